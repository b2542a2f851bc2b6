use clap::{Parser, Subcommand};
use nachalib::{
    convert,
    error::{AchError, Result},
    file::File,
    flatten::flatten,
    reader, writer,
};
use rust_decimal::Decimal;
use std::fs;
use std::io::{self, BufReader};
use std::process::exit;
use tracing::error;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "nacha", version, about = "Чтение, проверка и конвертация файлов ACH (NACHA)")]
struct Cli {
    /// Уровень логирования: error, warn, info, debug, trace
    #[arg(long = "log-level", default_value = "error")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Прочитать файл, проверить и показать сводку
    Read { file: String },
    /// Перечитать файл и вывести каноническую форму
    Write {
        file: String,
        /// Выходной файл (по умолчанию stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },
    /// Слить совместимые батчи файла
    Flatten {
        file: String,
        /// Выходной файл (по умолчанию stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<String>,
    },
    /// Конвертировать файл в структурированный вид
    Convert {
        /// Вывести JSON в stdout
        #[arg(long)]
        json: bool,
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);
    if let Err(err) = run(cli.command) {
        error!("{err}");
        // 0 — успех, 1 — ошибка проверки, 2 — ошибка ввода-вывода.
        match err {
            AchError::Io(_) => exit(2),
            _ => exit(1),
        }
    }
}

fn setup_logging(level: &str) {
    let level = match level {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        _ => LevelFilter::ERROR,
    };
    // stdout занят данными, журнал уходит в stderr.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_max_level(level)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Read { file } => {
            let parsed = open(&file)?;
            describe(&parsed);
            Ok(())
        }
        Command::Write { file, output } => {
            let mut parsed = open(&file)?;
            parsed.create()?;
            emit(&parsed, output)
        }
        Command::Flatten { file, output } => {
            let parsed = open(&file)?;
            let flattened = flatten(&parsed)?;
            emit(&flattened, output)
        }
        Command::Convert { json, file } => {
            if !json {
                return Err(AchError::FieldFormat {
                    field: "Format",
                    msg: "only --json output is supported".to_string(),
                });
            }
            let parsed = open(&file)?;
            convert::file_to_json(io::stdout(), &parsed)
        }
    }
}

fn open(path: &str) -> Result<File> {
    let fd = fs::File::open(path)?;
    reader::read(BufReader::new(fd))
}

fn emit(file: &File, output: Option<String>) -> Result<()> {
    match output {
        Some(path) => writer::write(fs::File::create(path)?, file),
        None => writer::write(io::stdout(), file),
    }
}

fn dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn describe(file: &File) {
    let h = &file.header;
    println!(
        "файл {} -> {}  создан {} {}",
        h.immediate_origin, h.immediate_destination, h.file_creation_date, h.file_creation_time
    );
    for batch in &file.batches {
        println!(
            "  батч {:>3} {} {:<16} записей {:>5}  дебет {:>14} кредит {:>14}",
            batch.header.batch_number,
            batch.header.standard_entry_class_code,
            batch.header.company_name,
            batch.entry_addenda_count(),
            dollars(batch.calculated_total_debit()),
            dollars(batch.calculated_total_credit()),
        );
    }
    for batch in &file.iat_batches {
        println!(
            "  батч {:>3} IAT {:<16} записей {:>5}  дебет {:>14} кредит {:>14}",
            batch.header.batch_number,
            batch.header.originator_identification,
            batch.entry_addenda_count(),
            dollars(batch.calculated_total_debit()),
            dollars(batch.calculated_total_credit()),
        );
    }
    println!(
        "  итого батчей {}  дебет {} кредит {}",
        file.batch_count(),
        dollars(file.calculated_total_debit()),
        dollars(file.calculated_total_credit()),
    );
}
