use clap::Parser;
use qrvc::config::{
    RawSettings, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, DEFAULT_RECOVERY, DEFAULT_SIZE,
    DEFAULT_VCARD_VERSION,
};

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.4.0" for releases, "0.4.0@abc1234 2024-01-15 14:30" for dev builds
pub fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

// `-v` selects the vCard version, so the tool version is shown in the help
// header instead of through a version flag.
#[derive(Parser, Debug)]
#[command(
    name = "qrvc",
    bin_name = "qrvc",
    version = get_version(),
    disable_version_flag = true,
    help_template = "{name} {version}\n{about}\n\n{usage-heading} {usage}\n\n{all-args}"
)]
#[command(about = "qrvc is a tool to prepare a QR code from a vCard", long_about = None)]
pub struct Cli {
    /// Do not ask for input interactively; requires a vCard input file
    #[arg(short, long)]
    pub silent: bool,

    /// The vCard input file; ".vcf" is tried when the name has no extension
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<String>,

    /// Output path without extension; ".vcf" and ".png" are appended
    /// [default: input file base name, or "vcard"]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// The vCard version to create
    #[arg(short = 'v', long = "version", value_name = "VERSION", default_value = DEFAULT_VCARD_VERSION)]
    pub vcard_version: String,

    /// QR code foreground color, a hex value like "#000" or a CSS color name
    #[arg(short, long, value_name = "COLOR", default_value = DEFAULT_FOREGROUND)]
    pub foreground: String,

    /// QR code background color, a hex value like "#fff" or a CSS color name
    #[arg(short, long, value_name = "COLOR", default_value = DEFAULT_BACKGROUND)]
    pub background: String,

    /// Draw a quiet zone around the QR code
    #[arg(short = 'r', long)]
    pub border: bool,

    /// Width and height of the QR code in pixels
    #[arg(short = 'z', long, value_name = "PIXELS", default_value_t = DEFAULT_SIZE)]
    pub size: u32,

    /// Error correction level: low, medium, quartile or high
    #[arg(short = 'e', long, value_name = "LEVEL", default_value = DEFAULT_RECOVERY)]
    pub recovery: String,

    /// Print the software bill of materials in CycloneDX format
    #[arg(short = 'm', long)]
    pub bom: bool,

    /// Verbose diagnostics on stderr
    #[arg(long)]
    pub verbose: bool,
}

impl Cli {
    pub fn raw_settings(&self) -> RawSettings {
        RawSettings {
            silent: self.silent,
            input: self.input.clone(),
            output: self.output.clone(),
            vcard_version: self.vcard_version.clone(),
            foreground: self.foreground.clone(),
            background: self.background.clone(),
            border: self.border,
            size: self.size,
            recovery: self.recovery.clone(),
        }
    }
}
