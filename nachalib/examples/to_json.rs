use nachalib::{convert, reader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: файл ACH из stdin -> JSON в stdout
    let file = reader::read(std::io::BufReader::new(std::io::stdin()))?;
    convert::file_to_json(std::io::stdout(), &file)?;
    Ok(())
}
