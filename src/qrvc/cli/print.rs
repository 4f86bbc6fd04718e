use super::styles::QRVC_THEME;
use colored::Colorize;
use qrvc::api::{CmdMessage, MessageLevel};
use qrvc::error::QrvcError;

pub const FAREWELL: &str = "👋";
pub const CANCELLED: &str = "You stopped with CTRL-C";

/// Output settings for one run. Silent mode hides informational output;
/// errors are always shown, on stderr.
#[derive(Debug, Clone, Copy)]
pub struct PrintContext {
    pub silent: bool,
}

impl PrintContext {
    pub fn new(silent: bool) -> Self {
        Self { silent }
    }

    pub fn print_messages(&self, messages: &[CmdMessage]) {
        for message in messages {
            let Some(line) = self.format_message(message) else {
                continue;
            };
            if message.level == MessageLevel::Error {
                eprintln!("{}", line);
            } else {
                println!("{}", line);
            }
        }
    }

    /// Reports a failed run the way `main` reports early failures.
    pub fn print_error(&self, err: &QrvcError) {
        self.print_messages(&[error_message(err)]);
    }

    fn format_message(&self, message: &CmdMessage) -> Option<String> {
        let line = match message.level {
            MessageLevel::Info if self.silent => return None,
            MessageLevel::Success if self.silent => return None,
            MessageLevel::Info => message.content.dimmed().to_string(),
            MessageLevel::Success => message.content.green().to_string(),
            MessageLevel::Error => message.content.red().to_string(),
        };
        Some(line)
    }

    pub fn print_intro(&self) {
        if self.silent {
            return;
        }
        let value = &QRVC_THEME.value;
        println!("You are running qrvc, a tool to prepare a QR code from a vCard.");
        println!(
            "Get a list of options by starting the program in the form: {}",
            value.apply_to("qrvc -h")
        );
        println!("Stop the program by pressing {}", value.apply_to("CTRL-C"));
        println!();
    }

    pub fn print_cancelled(&self) {
        println!("{}", CANCELLED);
    }

    pub fn print_farewell(&self) {
        println!("{}", FAREWELL);
    }
}

fn error_message(err: &QrvcError) -> CmdMessage {
    CmdMessage::error(format!("Error: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(context: PrintContext, message: CmdMessage) -> Option<String> {
        colored::control::set_override(false);
        context.format_message(&message)
    }

    #[test]
    fn silent_hides_info_and_success() {
        let silent = PrintContext::new(true);
        assert_eq!(plain(silent, CmdMessage::info("reading")), None);
        assert_eq!(plain(silent, CmdMessage::success("written")), None);
        assert_eq!(
            plain(silent, CmdMessage::error("broken")).as_deref(),
            Some("broken")
        );
    }

    #[test]
    fn error_message_names_the_failure() {
        let message = error_message(&QrvcError::Config("Missing input file path".into()));
        assert_eq!(message.level, MessageLevel::Error);
        assert_eq!(
            message.content,
            "Error: Configuration error: Missing input file path"
        );
    }

    #[test]
    fn loud_shows_everything() {
        let loud = PrintContext::new(false);
        assert_eq!(
            plain(loud, CmdMessage::info("reading")).as_deref(),
            Some("reading")
        );
        assert_eq!(
            plain(loud, CmdMessage::success("written")).as_deref(),
            Some("written")
        );
    }
}
