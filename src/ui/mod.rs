pub mod layout;
pub mod styles;

pub use layout::*;
pub use styles::{
    border_style, indicator_color, indicator_icon, key_desc_span, key_span, selected_style,
    title_style, Theme,
};
