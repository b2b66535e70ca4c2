mod de;
mod id;
pub mod image;
pub mod note;
pub mod page;
pub mod snapshot;

pub use image::Image;
pub use note::Note;
pub use page::Page;
pub use snapshot::Snapshot;
