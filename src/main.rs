use anyhow::{Context, Result};
use kredi_kart_takip::launcher;

fn main() -> Result<()> {
    let code = launcher::launch().context("Kredi Kartı Takip Programı failed to start")?;
    std::process::exit(code);
}
