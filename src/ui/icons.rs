pub struct Icons;

impl Icons {
    pub const RECEIPT: &str = "🧾";
    pub const FOLDER: &str = "📂";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const EYE: &str = "👀";
    pub const NEW: &str = "✨";
    pub const SKIP: &str = "⏭️";
    pub const DATABASE: &str = "🗄️";
    pub const GEAR: &str = "⚙️";
    pub const EMPTY: &str = "∅";
}
