use clap::Args;
use std::path::PathBuf;

/// Arguments for decoding barcodes
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Barcodes to decode (reads one per line from stdin if not provided)
    #[arg(value_name = "BARCODE")]
    pub barcodes: Vec<String>,

    /// Read barcodes from a file, one per line
    #[arg(short = 'f', long, conflicts_with = "barcodes")]
    pub file: Option<PathBuf>,

    /// Output JSON, one document per barcode
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short = 'p', long, requires = "json")]
    pub pretty: bool,
}

/// Arguments for checking that two labels belong together
#[derive(Args, Debug)]
pub struct LinkArgs {
    /// Primary or concatenated barcode
    pub primary: String,

    /// Secondary or concatenated barcode
    pub secondary: String,
}

/// Arguments for computing a check character
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Barcode text the check character covers, flag included
    pub data: String,
}

/// Arguments for showing the effective settings
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
