use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match clinicd::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("clinicd: {err:#}");
            ExitCode::FAILURE
        }
    }
}
