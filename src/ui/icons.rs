pub struct Icons;

impl Icons {
    pub const DOG: &str = "🐕";
    pub const PAW: &str = "🐾";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const EMPTY: &str = "∅";
}
