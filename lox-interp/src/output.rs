/// Sink for the text written by `print` statements.
pub trait Output {
    /// Writes one line of program output.
    fn print(&mut self, text: &str);
}

/// Writes every line to the process' standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stdout;

impl Output for Stdout {
    fn print(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Captures printed lines. Useful for tests and for embedding.
impl Output for Vec<String> {
    fn print(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

impl<O: Output + ?Sized> Output for &mut O {
    fn print(&mut self, text: &str) {
        (**self).print(text);
    }
}
