#[derive(Debug, Clone)]
pub struct ProgressBar {
    total: u64,
    current: u64,
    width: u16,
    message: String,
}

impl ProgressBar {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            current: 0,
            width: 30,
            message: String::new(),
        }
    }

    pub fn with_message(total: u64, message: impl Into<String>) -> Self {
        let mut bar = Self::new(total);
        bar.message = message.into();
        bar
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width.max(1);
    }

    pub fn set(&mut self, value: u64) {
        self.current = value.min(self.total);
    }

    /// `Preparing files [=========         ] 3/10`
    pub fn render(&self, supports_unicode: bool) -> String {
        let (filled, empty) = self.bar_segments();
        let bar = if supports_unicode {
            format!("{}{}", "━".repeat(filled), "─".repeat(empty))
        } else {
            format!("{}{}", "=".repeat(filled), " ".repeat(empty))
        };

        let mut out = String::new();
        if !self.message.is_empty() {
            out.push_str(&self.message);
            out.push(' ');
        }
        out.push_str(&format!("[{}] {}/{}", bar, self.current, self.total));
        out
    }

    fn bar_segments(&self) -> (usize, usize) {
        let width = self.width as usize;
        if self.total == 0 {
            return (width, 0);
        }
        let filled = ((self.current as u128 * width as u128) / self.total as u128) as usize;
        let filled = filled.min(width);
        (filled, width - filled)
    }
}
