//! Default pipeline stages.
//!
//! The standard transformation consists of:
//!
//! 1. **CountArticlesStage** - Count article headings in the posts list
//! 2. **ExtractTagsStage** - Parse tag sets out of metadata scripts
//! 3. **RenderTagsStage** - Append rendered tags to each metadata block
//! 4. **SidebarStage** - Insert the "all articles" entry into the category list
//! 5. **InjectScriptStage** - Replace the body of the development script
//! 6. **WriteStage** - Write the document to the output path

mod count;
mod extract;
mod script;
mod sidebar;
mod tags;
mod write;

pub use count::CountArticlesStage;
pub use extract::ExtractTagsStage;
pub use script::InjectScriptStage;
pub use sidebar::SidebarStage;
pub use tags::RenderTagsStage;
pub use write::WriteStage;
