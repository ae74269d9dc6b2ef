use structured_error::{Attributes, Severity, StructuredError};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut attrs = Attributes::new();
    attrs.insert("filename".to_string(), "Readme.md".into());
    attrs.insert("lines".to_string(), 42.into());

    let original = StructuredError::new(Severity::WARN2, "quota", "quota nearly exhausted", Some(attrs))?;
    let json = original.to_json()?;
    println!("{json}");

    let decoded = StructuredError::from_json(&json)?;
    println!("{decoded}");
    println!("equal after round trip: {}", decoded == original);

    if let Err(e) = StructuredError::from_json("{not valid json}") {
        println!("decode failed: {e}");
    }
    Ok(())
}
