pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{dog_line, error, header, info, notice, section, success, summary_row, warn};
pub use table::{dog_table, stats_table, TableBuilder};
pub use theme::{theme, Theme};
