use console::style;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// One row of a listing: a dimmed id column followed by the text.
    pub fn row(&self, id: i64, text: &str) {
        println!("{:>5}  {}", style(id).dim(), text);
    }

    /// Column headings of a listing.
    pub fn headings(&self, columns: &[String]) {
        println!("{}", style(columns.join(" | ")).dim());
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
