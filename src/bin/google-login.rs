use anyhow::Result;
use google_oauth_rs::log::set_global_logger;
use google_oauth_rs::run;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    set_global_logger();

    let args = env::args_os()
        .map(|s| s.to_string_lossy().into_owned())
        .collect();
    let res = run(args).await?;
    println!("{res}");
    Ok(())
}
