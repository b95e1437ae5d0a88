//! Dictionary-based English -> Thai substitution for imported headlines
//!
//! Not a real translator: known football terms and club names are swapped
//! for their Thai equivalents, everything else is left as written.

const DICTIONARY: &[(&str, &str)] = &[
    ("premier league", "พรีเมียร์ลีก"),
    ("champions league", "แชมเปียนส์ลีก"),
    ("europa league", "ยูโรปาลีก"),
    ("world cup", "ฟุตบอลโลก"),
    ("thai league", "ไทยลีก"),
    ("manchester united", "แมนเชสเตอร์ ยูไนเต็ด"),
    ("manchester city", "แมนเชสเตอร์ ซิตี้"),
    ("man utd", "แมนยู"),
    ("liverpool", "ลิเวอร์พูล"),
    ("arsenal", "อาร์เซนอล"),
    ("chelsea", "เชลซี"),
    ("tottenham", "ท็อตแน่ม"),
    ("real madrid", "เรอัล มาดริด"),
    ("barcelona", "บาร์เซโลนา"),
    ("bayern munich", "บาเยิร์น มิวนิค"),
    ("football", "ฟุตบอล"),
    ("soccer", "ฟุตบอล"),
    ("match", "การแข่งขัน"),
    ("goals", "ประตู"),
    ("goal", "ประตู"),
    ("wins", "ชนะ"),
    ("win", "ชนะ"),
    ("draw", "เสมอ"),
    ("defeat", "พ่ายแพ้"),
    ("transfer", "การย้ายทีม"),
    ("coach", "โค้ช"),
    ("manager", "ผู้จัดการทีม"),
    ("players", "นักเตะ"),
    ("player", "นักเตะ"),
    ("injury", "อาการบาดเจ็บ"),
    ("season", "ฤดูกาล"),
    ("striker", "กองหน้า"),
    ("goalkeeper", "ผู้รักษาประตู"),
    ("penalty", "จุดโทษ"),
    ("final", "นัดชิงชนะเลิศ"),
    ("team", "ทีม"),
    ("league", "ลีก"),
    ("club", "สโมสร"),
    ("fans", "แฟนบอล"),
    ("stadium", "สนาม"),
];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\''
}

/// Replace dictionary phrases, longest first, matching whole words
/// case-insensitively
pub fn translate_to_thai(text: &str) -> String {
    let mut phrases: Vec<&(&str, &str)> = DICTIONARY.iter().collect();
    phrases.sort_by_key(|(en, _)| std::cmp::Reverse(en.len()));

    let mut out = String::with_capacity(text.len() * 2);
    let mut i = 0;
    let mut prev: Option<char> = None;

    'outer: while i < text.len() {
        let rest = &text[i..];
        if prev.is_none_or(|p| !is_word_char(p)) {
            for (en, th) in &phrases {
                let Some(candidate) = rest.get(..en.len()) else {
                    continue;
                };
                let next = rest[en.len()..].chars().next();
                if candidate.eq_ignore_ascii_case(en) && next.is_none_or(|n| !is_word_char(n)) {
                    out.push_str(th);
                    i += en.len();
                    prev = en.chars().last();
                    continue 'outer;
                }
            }
        }

        let Some(c) = rest.chars().next() else {
            break;
        };
        out.push(c);
        i += c.len_utf8();
        prev = Some(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_terms_replaced() {
        assert_eq!(translate_to_thai("Liverpool win"), "ลิเวอร์พูล ชนะ");
        assert_eq!(translate_to_thai("FOOTBALL"), "ฟุตบอล");
    }

    #[test]
    fn test_longest_phrase_first() {
        assert_eq!(
            translate_to_thai("Manchester United in Champions League final"),
            "แมนเชสเตอร์ ยูไนเต็ด in แชมเปียนส์ลีก นัดชิงชนะเลิศ"
        );
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(translate_to_thai("winter teamwork"), "winter teamwork");
        assert_eq!(translate_to_thai("goal!"), "ประตู!");
    }

    #[test]
    fn test_untouched_text() {
        assert_eq!(translate_to_thai(""), "");
        assert_eq!(translate_to_thai("ข่าวฟุตบอลไทย"), "ข่าวฟุตบอลไทย");
    }
}
