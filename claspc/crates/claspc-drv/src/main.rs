use std::process;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    claspc_drv::run(&args)?;
    Ok(())
}
