pub mod admin;
pub mod audit;
pub mod auth;
pub mod blog_posts;
pub mod categories;
pub mod contact;
pub mod events;
pub mod images;
pub mod logos;
pub mod settings;
