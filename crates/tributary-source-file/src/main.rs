//! Binary entrypoint for the directory-of-JSON source connector.

use std::process::ExitCode;

use tributary_runtime::SourceRunner;
use tributary_source_file::FileSource;

fn main() -> ExitCode {
    SourceRunner::stdout(FileSource::new()).start()
}
