/// Process adapters that shell out to external tools
mod command_scanner;
mod disabled_scanner;

pub use command_scanner::CommandScanner;
pub use disabled_scanner::DisabledScanner;
