pub mod color;
pub mod error;
pub mod expressions;
pub mod mutate;
pub mod path;
pub mod scan;
pub mod text;

pub use color::{from_unit, rgba_from_value, to_unit, Encoding};
pub use error::{LottieError, LottieResult};
pub use expressions::{resolve_expression, CompObject};
pub use mutate::{get_keyframe_colors, replace_color, replace_keyframe_color, replace_text};
pub use path::{resolve, Resolved};
pub use scan::{color_inventory, scan_colors, scan_colors_with, ScanOptions};
pub use text::{has_text_layers, scan_texts};
