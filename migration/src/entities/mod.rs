pub mod advertisement;
pub mod news_article;
pub mod site_setting;
pub mod user;

pub use advertisement::Entity as AdvertisementEntity;
pub use news_article::Entity as NewsArticleEntity;
pub use site_setting::Entity as SiteSettingEntity;
pub use user::Entity as UserEntity;
