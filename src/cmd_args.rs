use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Origin of the remote service, scheme and host:port.
    #[clap(
        short = 'o',
        long,
        default_value = "http://localhost:5000",
        help = "server origin"
    )]
    origin: String,

    /// Enable verbose logging.
    #[clap(short = 'v', long, help = "verbose logging")]
    verbose: bool,

    /// Override the remembered-identity state file path.
    #[clap(long, help = "identity state file path")]
    state_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    origin: String,
    verbose: bool,
    state_path: Option<String>,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        Self::from(ClapArgs::parse())
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::from(ClapArgs::parse_from(itr))
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn state_path(&self) -> Option<&str> {
        self.state_path.as_deref()
    }
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            origin: args.origin,
            verbose: args.verbose,
            state_path: args.state_path,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program"]);
        assert_eq!(args.origin(), "http://localhost:5000");
        assert!(!args.verbose());
        assert_eq!(args.state_path(), None);
    }

    #[test]
    fn test_parse_origin_short_flag() {
        let args = CommandLineArgs::parse_from(["program", "-o", "https://docs.example.com"]);
        assert_eq!(args.origin(), "https://docs.example.com");
    }

    #[test]
    fn test_parse_state_path_override() {
        let args = CommandLineArgs::parse_from(["program", "--state-path", "/tmp/identity.json"]);
        assert_eq!(args.state_path(), Some("/tmp/identity.json"));
    }
}
