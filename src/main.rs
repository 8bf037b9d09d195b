use declaration_pdf::{
    DeclarationError, DeclarationInput, GeneratorConfig, collect_input, create_declaration_pdf,
};
use std::error::Error;
use std::io::{self, Write};
use std::process::ExitCode;

fn rule(c: char) -> String {
    c.to_string().repeat(70)
}

fn print_error_chain(err: &dyn Error) {
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}

/// Names the file by its identifier, not by the full output path.
fn report_success<W: Write>(out: &mut W, input: &DeclarationInput) -> io::Result<()> {
    let filename = input.output_filename();
    writeln!(out, "\n✓ PDF created successfully: {}", filename)?;
    writeln!(out)?;
    writeln!(out, "{}", rule('='))?;
    writeln!(out, "SUCCESS! File saved as: {}", filename)?;
    writeln!(out, "{}", rule('='))?;
    out.flush()
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    println!("{}", rule('='));
    println!("Scientific Declaration PDF Generator");
    println!("AGH University of Science and Technology");
    println!("{}", rule('='));
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let input = match collect_input(&mut stdin.lock(), &mut stdout) {
        Ok(input) => input,
        Err(err @ DeclarationError::MissingInput { .. }) => {
            println!("Error: {}!", err);
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("Error reading input: {}", err);
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!("{}", rule('-'));
    println!("Generating PDF...");
    let _ = stdout.flush();

    match create_declaration_pdf(&input, GeneratorConfig::default()) {
        Ok(path) => {
            log::debug!("Saved to {}", path.display());
            let _ = report_success(&mut stdout, &input);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("\n✗ Error creating PDF: {}", err);
            print_error_chain(&err);
            ExitCode::FAILURE
        }
    }
}
