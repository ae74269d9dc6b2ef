use structured_error::init::{init_tracing_with_config, TracingConfig};
use structured_error::{Severity, StructuredError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing_with_config(TracingConfig::from_env())?;

    let created = StructuredError::builder(Severity::INFO, "filecreated", "new file created")
        .attribute("filename", "Readme.md")
        .attribute("lines", 42)
        .build()?;
    println!("{created}");
    created.emit();

    if created.is_error_code("FileCreated") {
        println!("matched code {}", created.code());
    }

    match StructuredError::new(999, "x", "y", None) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("rejected: {e}"),
    }

    let full = StructuredError::new(Severity::FATAL2, "diskfull", "volume /var is full", None)?;
    full.emit();
    eprintln!("{full}");
    Ok(())
}
