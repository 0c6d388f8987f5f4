pub mod brief;
pub mod frontend;
pub mod page;
pub mod profile;
pub mod settings;
pub mod user;

pub use brief::Brief;
pub use frontend::FrontendContent;
pub use page::Page;
pub use profile::{Brand, Creator};
pub use settings::SiteSettings;
pub use user::{PublicUser, User};
