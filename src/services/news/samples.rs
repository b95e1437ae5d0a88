//! Built-in Thai football stories published alongside the imported feed

use chrono::{DateTime, Duration, Utc};

use crate::storage::{NewsCategory, NewsDraft};
use crate::utils::create_slug;

struct Sample {
    title: &'static str,
    summary: &'static str,
    content: &'static str,
    image_url: &'static str,
    source: &'static str,
    tags: &'static [&'static str],
    hours_ago: i64,
}

const SAMPLES: &[Sample] = &[
    Sample {
        title: "ช้างศึกประกาศรายชื่อ 23 แข้งลุยศึกคัดบอลโลก",
        summary: "ทีมชาติไทยเปิดรายชื่อนักเตะชุดลุยเกมคัดเลือกฟุตบอลโลกรอบต่อไป",
        content: "สมาคมกีฬาฟุตบอลแห่งประเทศไทยฯ ประกาศรายชื่อนักเตะ 23 คน เพื่อเตรียมลงสนามในเกมคัดเลือกฟุตบอลโลก โดยมีทั้งผู้เล่นประสบการณ์สูงและดาวรุ่งจากไทยลีกผสมผสานกัน",
        image_url: "/images/news/thai-national-team.jpg",
        source: "ข่าวฟุตบอลไทย",
        tags: &["ทีมชาติไทย", "ฟุตบอลโลก"],
        hours_ago: 2,
    },
    Sample {
        title: "บุรีรัมย์ ยูไนเต็ด คว้าแชมป์ไทยลีกอีกสมัย",
        summary: "ปราสาทสายฟ้าปิดฉากฤดูกาลด้วยการครองแชมป์ลีกสูงสุด",
        content: "บุรีรัมย์ ยูไนเต็ด เก็บชัยชนะในนัดสุดท้ายของฤดูกาล ทำให้คว้าแชมป์ไทยลีกได้อย่างเป็นทางการ ท่ามกลางแฟนบอลที่เดินทางมาให้กำลังใจเต็มสนาม",
        image_url: "/images/news/buriram-champion.jpg",
        source: "ไทยลีก",
        tags: &["ไทยลีก", "บุรีรัมย์ ยูไนเต็ด"],
        hours_ago: 5,
    },
    Sample {
        title: "เกียรติศักดิ์ เสนาเมือง เผยแผนพัฒนาเยาวชนไทย",
        summary: "ตำนานกองหน้าทีมชาติไทยพูดถึงการสร้างนักเตะรุ่นใหม่",
        content: "เกียรติศักดิ์ เสนาเมือง ให้สัมภาษณ์ถึงแนวทางการพัฒนานักเตะเยาวชน โดยเน้นการสร้างโครงสร้างลีกเยาวชนที่แข็งแรงและการส่งเสริมโค้ชในระดับรากหญ้า",
        image_url: "/images/news/zico.jpg",
        source: "ข่าวฟุตบอลไทย",
        tags: &["ทีมชาติไทย", "เยาวชน"],
        hours_ago: 9,
    },
    Sample {
        title: "ชนาธิป สรงกระสินธ์ ฟิตพร้อมกลับมาลงสนาม",
        summary: "เมสซี่เจ ผ่านการทดสอบร่างกายหลังพักรักษาอาการบาดเจ็บ",
        content: "ชนาธิป สรงกระสินธ์ กลับมาซ้อมร่วมกับทีมเต็มรูปแบบหลังพักรักษาอาการบาดเจ็บ ทีมแพทย์ยืนยันว่าพร้อมลงสนามในเกมลีกนัดถัดไป",
        image_url: "/images/news/chanathip.jpg",
        source: "ไทยลีก",
        tags: &["ชนาธิป", "อาการบาดเจ็บ"],
        hours_ago: 14,
    },
    Sample {
        title: "ไทยลีกเตรียมใช้ระบบ VAR ครบทุกนัดฤดูกาลหน้า",
        summary: "ฝ่ายจัดการแข่งขันยืนยันการขยายการใช้ VAR",
        content: "บริษัท ไทยลีก จำกัด ยืนยันว่าฤดูกาลหน้าจะนำระบบ VAR มาใช้ครบทุกนัดในลีกสูงสุด เพื่อยกระดับมาตรฐานการตัดสินให้ใกล้เคียงลีกชั้นนำของเอเชีย",
        image_url: "/images/news/var.jpg",
        source: "ไทยลีก",
        tags: &["ไทยลีก", "VAR"],
        hours_ago: 20,
    },
];

/// The built-in Thai articles, dated relative to `now`
pub fn thai_sample_articles(now: DateTime<Utc>) -> Vec<NewsDraft> {
    SAMPLES
        .iter()
        .map(|s| NewsDraft {
            title: s.title.to_string(),
            original_title: None,
            content: s.content.to_string(),
            summary: Some(s.summary.to_string()),
            image_url: Some(s.image_url.to_string()),
            published_at: now - Duration::hours(s.hours_ago),
            source: s.source.to_string(),
            category: NewsCategory::Thai,
            slug: create_slug(s.title),
            tags: s.tags.iter().map(|t| t.to_string()).collect(),
            url: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_samples_are_thai_with_unique_slugs() {
        let articles = thai_sample_articles(Utc::now());
        assert_eq!(articles.len(), SAMPLES.len());

        let slugs: HashSet<&str> = articles.iter().map(|a| a.slug.as_str()).collect();
        assert_eq!(slugs.len(), articles.len());
        assert!(articles.iter().all(|a| a.category == NewsCategory::Thai));
        assert!(articles.iter().all(|a| !a.slug.is_empty()));
    }
}
