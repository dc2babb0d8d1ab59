//! Where reports go.

/// Sink for report lines.
///
/// Reports only say what kind of line they emit. Warnings go to stderr on a
/// terminal; everything else goes to stdout.
pub trait Output {
    /// Heading for the list that follows.
    fn section(&mut self, name: &str);

    fn key_value(&mut self, key: &str, value: &str);

    fn numbered_item(&mut self, index: usize, text: &str);

    /// Continuation line under a numbered item.
    fn detail(&mut self, text: &str);

    /// An edit that was or would be applied.
    fn added_item(&mut self, text: &str);

    fn warning(&mut self, msg: &str);

    /// Labelled rule, e.g. before a previewed file.
    fn divider(&mut self, label: &str);

    /// Text printed as is.
    fn preformatted(&mut self, text: &str);

    fn newline(&mut self);
}

/// Result of a command, rendered once the work is done.
pub trait Report {
    fn render(&self, out: &mut dyn Output);
}

/// Plain terminal output.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Output for TerminalOutput {
    fn section(&mut self, name: &str) {
        println!("{}:", name);
    }

    fn key_value(&mut self, key: &str, value: &str) {
        println!("{}: {}", key, value);
    }

    fn numbered_item(&mut self, index: usize, text: &str) {
        println!("  {}. {}", index, text);
    }

    fn detail(&mut self, text: &str) {
        println!("       {}", text);
    }

    fn added_item(&mut self, text: &str) {
        println!("  + {}", text);
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("warning: {}", msg);
    }

    fn divider(&mut self, label: &str) {
        println!("── {} ──", label);
    }

    fn preformatted(&mut self, text: &str) {
        println!("{}", text);
    }

    fn newline(&mut self) {
        println!();
    }
}
