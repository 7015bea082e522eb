use crate::index::dictionary::Dictionary;
use crate::index::postings::PostingsReader;
use anyhow::Result;
use std::fs;
use std::path::Path;

/// Display statistics for an existing index
pub fn show_stats(dictionary_path: &Path, postings_path: &Path) -> Result<()> {
    let dictionary = Dictionary::load(dictionary_path)?;
    let postings = PostingsReader::open(postings_path)?;

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Dictionary file:  {}", dictionary_path.display());
    println!("Postings file:    {}", postings_path.display());
    println!("Documents:        {}", postings.doc_count());
    println!("Distinct terms:   {}", dictionary.len());

    if let Ok(meta) = fs::metadata(dictionary_path) {
        println!("Dictionary size:  {}", format_size(meta.len()));
    }
    if let Ok(meta) = fs::metadata(postings_path) {
        println!("Postings size:    {}", format_size(meta.len()));
    }

    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
