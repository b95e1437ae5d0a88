//! Service-layer tests: advertisements, news sync, users and site settings

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use livescore::errors::{LivescoreError, Result};
use livescore::services::{NewsSource, NewsSyncService, ThaiSampleSource};
use livescore::storage::{
    AdPosition, AdSize, AdStatus, AdvertisementPatch, LogoSettings, NewAdvertisement,
    NewsCategory, NewsDraft, UserPatch, UserRole,
};

use common::{FakeTransport, seed_user, temp_storage, test_context};

fn new_ad(image_url: &str) -> NewAdvertisement {
    NewAdvertisement {
        name: "Match day banner".to_string(),
        position: AdPosition::Hero,
        size: AdSize::Large,
        image_url: image_url.to_string(),
        destination_url: "https://sponsor.example.com/promo".to_string(),
        status: AdStatus::Active,
        start_date: None,
        end_date: None,
        revenue: 0.0,
    }
}

// =============================================================================
// AdvertisementService
// =============================================================================

#[tokio::test]
async fn test_created_ad_reads_back_unchanged() {
    let (_dir, context) = test_context(FakeTransport::new()).await;

    let image = "https://abc.public.blob.vercel-storage.com/ads/banner.png";
    let created = context.ads.create_ad(new_ad(image)).await.unwrap();
    let loaded = context
        .ads
        .get_advertisement_by_id(created.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(loaded.image_url, image);
    assert_eq!(loaded.ctr, 0.0);
    assert_eq!(loaded.impressions, 0);
    assert_eq!(loaded.clicks, 0);
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let (_dir, context) = test_context(FakeTransport::new()).await;

    let err = context
        .ads
        .create_ad(NewAdvertisement {
            name: "  ".to_string(),
            ..new_ad("/ads/a.png")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LivescoreError::Validation(_)));

    let err = context
        .ads
        .create_ad(NewAdvertisement {
            destination_url: "javascript:alert(1)".to_string(),
            ..new_ad("/ads/a.png")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LivescoreError::Validation(_)));

    let now = Utc::now();
    let err = context
        .ads
        .create_ad(NewAdvertisement {
            start_date: Some(now),
            end_date: Some(now - chrono::Duration::hours(1)),
            ..new_ad("/ads/a.png")
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LivescoreError::Validation(_)));
}

#[tokio::test]
async fn test_tracking_updates_ctr() {
    let (_dir, context) = test_context(FakeTransport::new()).await;
    let ad = context.ads.create_ad(new_ad("/ads/a.png")).await.unwrap();

    for _ in 0..100 {
        assert!(context.ads.track_impression(ad.id).await.unwrap());
    }
    for _ in 0..25 {
        assert!(context.ads.track_click(ad.id).await.unwrap());
    }

    let loaded = context.ads.get_advertisement_by_id(ad.id).await.unwrap().unwrap();
    assert_eq!(loaded.impressions, 100);
    assert_eq!(loaded.clicks, 25);
    assert!((loaded.ctr - 25.0).abs() < 1e-9);

    assert!(!context.ads.track_click(424242).await.unwrap());
}

#[tokio::test]
async fn test_update_validates_window_against_stored_dates() {
    let (_dir, context) = test_context(FakeTransport::new()).await;
    let now = Utc::now();
    let ad = context
        .ads
        .create_ad(NewAdvertisement {
            start_date: Some(now),
            ..new_ad("/ads/a.png")
        })
        .await
        .unwrap();

    let err = context
        .ads
        .update_ad(
            ad.id,
            AdvertisementPatch {
                end_date: Some(Some(now - chrono::Duration::days(1))),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, LivescoreError::Validation(_)));

    assert!(
        context
            .ads
            .update_ad(999, AdvertisementPatch::default())
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_delete_with_image_removes_local_file() {
    let (dir, context) = test_context(FakeTransport::new()).await;

    let url = context
        .blob
        .upload_file("banner.png", "image/png", vec![1, 2, 3])
        .await
        .unwrap();
    assert_eq!(url, "/ads/banner.png");
    let path = dir.path().join("ads").join("banner.png");
    assert!(path.exists());

    let ad = context.ads.create_ad(new_ad(&url)).await.unwrap();
    assert!(context.ads.delete_advertisement(ad.id, true).await.unwrap());
    assert!(!path.exists());
    assert!(!context.ads.delete_advertisement(ad.id, true).await.unwrap());
}

#[tokio::test]
async fn test_delete_keeps_image_by_default() {
    let (dir, context) = test_context(FakeTransport::new()).await;
    let url = context
        .blob
        .upload_file("keep.png", "image/png", vec![1])
        .await
        .unwrap();
    let ad = context.ads.create_ad(new_ad(&url)).await.unwrap();

    assert!(context.ads.delete_advertisement(ad.id, false).await.unwrap());
    assert!(dir.path().join("ads").join("keep.png").exists());
}

// =============================================================================
// NewsSyncService
// =============================================================================

struct StaticSource {
    name: &'static str,
    drafts: Vec<NewsDraft>,
    calls: AtomicUsize,
}

#[async_trait]
impl NewsSource for StaticSource {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self) -> Result<Vec<NewsDraft>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.drafts.clone())
    }
}

struct FailingSource;

#[async_trait]
impl NewsSource for FailingSource {
    fn name(&self) -> &'static str {
        "broken"
    }

    async fn fetch(&self) -> Result<Vec<NewsDraft>> {
        Err(LivescoreError::upstream(500, "News API error! status: 500"))
    }
}

fn international(slug: &str) -> NewsDraft {
    NewsDraft {
        title: "ลิเวอร์พูล ชนะ".to_string(),
        original_title: Some("Liverpool win".to_string()),
        content: "content".to_string(),
        summary: None,
        image_url: None,
        published_at: Utc::now(),
        source: "BBC Sport".to_string(),
        category: NewsCategory::International,
        slug: slug.to_string(),
        tags: vec!["ฟุตบอลต่างประเทศ".to_string()],
        url: Some("https://news.example.com/a".to_string()),
    }
}

#[tokio::test]
async fn test_sync_all_sources() {
    let (_dir, storage) = temp_storage().await;
    let service = NewsSyncService::new(
        storage.clone(),
        vec![
            Arc::new(ThaiSampleSource),
            Arc::new(StaticSource {
                name: "static",
                drafts: vec![international("liverpool-win")],
                calls: AtomicUsize::new(0),
            }),
        ],
    );

    assert!(service.last_sync().is_none());
    let report = service.sync_all_news().await.unwrap();
    assert_eq!(report.sources.len(), 2);
    assert_eq!(report.sources[1].articles, 1);
    assert_eq!(report.stored, report.sources[0].articles + 1);
    assert_eq!(service.last_sync(), Some(report.synced_at));

    let thai = service.list_news(Some(NewsCategory::Thai), 50).await.unwrap();
    assert_eq!(thai.len(), report.sources[0].articles);

    let article = service.get_by_slug("liverpool-win").await.unwrap().unwrap();
    assert_eq!(article.original_title.as_deref(), Some("Liverpool win"));

    // Running again updates in place
    let again = service.sync_all_news().await.unwrap();
    assert_eq!(again.stored, report.stored);
    let all = service.list_news(None, 100).await.unwrap();
    assert_eq!(all.len(), report.stored);
}

#[tokio::test]
async fn test_failing_source_aborts_sync() {
    let (_dir, storage) = temp_storage().await;
    let service = NewsSyncService::new(
        storage,
        vec![Arc::new(ThaiSampleSource), Arc::new(FailingSource)],
    );

    let err = service.sync_all_news().await.unwrap_err();
    assert!(matches!(err, LivescoreError::Upstream { status: 500, .. }));
    assert!(service.last_sync().is_none());
    assert!(service.list_news(None, 100).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sync_if_stale_skips_fresh_data() {
    let (_dir, storage) = temp_storage().await;
    let source = Arc::new(StaticSource {
        name: "static",
        drafts: vec![international("a")],
        calls: AtomicUsize::new(0),
    });
    let service = NewsSyncService::new(storage, vec![source.clone()]);

    assert!(
        service
            .sync_if_stale(Duration::from_secs(3600))
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        service
            .sync_if_stale(Duration::from_secs(3600))
            .await
            .unwrap()
            .is_none()
    );
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);

    assert!(service.sync_if_stale(Duration::ZERO).await.unwrap().is_some());
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

// =============================================================================
// UserService
// =============================================================================

#[tokio::test]
async fn test_authenticate_with_argon2_hash() {
    let (_dir, context) = test_context(FakeTransport::new()).await;
    let user = seed_user(&context, "admin", UserRole::Admin).await;
    assert!(user.last_login.is_none());

    let ok = context
        .users
        .authenticate("admin", "correct-horse-battery")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ok.id, user.id);
    assert!(ok.last_login.is_some());

    assert!(
        context
            .users
            .authenticate("admin", "wrong-password")
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        context
            .users
            .authenticate("nobody", "correct-horse-battery")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_inactive_user_cannot_log_in() {
    let (_dir, context) = test_context(FakeTransport::new()).await;
    seed_user(&context, "admin", UserRole::Admin).await;
    let editor = seed_user(&context, "editor", UserRole::Editor).await;

    context
        .users
        .update_user(
            editor.id,
            UserPatch {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(
        context
            .users
            .authenticate("editor", "correct-horse-battery")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let (_dir, context) = test_context(FakeTransport::new()).await;
    seed_user(&context, "admin", UserRole::Admin).await;

    let err = context
        .users
        .create_user(livescore::storage::NewUser {
            username: "admin".to_string(),
            email: "other@example.com".to_string(),
            password: "another-password".to_string(),
            role: UserRole::User,
            is_active: true,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, LivescoreError::Validation(_)));
}

#[tokio::test]
async fn test_last_admin_is_protected() {
    let (_dir, context) = test_context(FakeTransport::new()).await;
    let admin = seed_user(&context, "admin", UserRole::Admin).await;

    assert!(context.users.delete_user(admin.id).await.is_err());
    assert!(
        context
            .users
            .update_user(
                admin.id,
                UserPatch {
                    role: Some(UserRole::Editor),
                    ..Default::default()
                },
            )
            .await
            .is_err()
    );

    let second = seed_user(&context, "admin2", UserRole::Admin).await;
    assert!(context.users.delete_user(admin.id).await.unwrap());
    assert!(context.users.delete_user(second.id).await.is_err());
}

#[tokio::test]
async fn test_password_change_rehashes() {
    let (_dir, context) = test_context(FakeTransport::new()).await;
    let admin = seed_user(&context, "admin", UserRole::Admin).await;

    context
        .users
        .update_user(
            admin.id,
            UserPatch {
                password: Some("a-brand-new-secret".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(
        context
            .users
            .authenticate("admin", "a-brand-new-secret")
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        context
            .users
            .authenticate("admin", "correct-horse-battery")
            .await
            .unwrap()
            .is_none()
    );
}

// =============================================================================
// SiteSettingsService
// =============================================================================

#[tokio::test]
async fn test_logo_defaults_then_update() {
    let (_dir, context) = test_context(FakeTransport::new()).await;

    let default_logo = context.settings.get_logo_settings().await.unwrap();
    assert_eq!(default_logo, LogoSettings::default());

    let saved = context
        .settings
        .update_logo_settings(LogoSettings {
            image_url: "/ads/logo.png".to_string(),
            width: 160,
            height: 40,
            alt_text: "  Livescore  ".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(saved.alt_text, "Livescore");
    assert_eq!(context.settings.get_logo_settings().await.unwrap(), saved);

    assert!(
        context
            .settings
            .update_logo_settings(LogoSettings {
                width: 0,
                ..saved
            })
            .await
            .is_err()
    );
}
