use clap::Parser;

/// Draws a choropleth map of election results by county.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the settings of the map. The other options
    /// take precedence over the values of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, default WI.txt) The file with the outlines of the counties.
    #[clap(long, value_parser)]
    pub boundaries: Option<String>,

    /// (file path, default WIGovernor2018.txt) The comma-separated file with the votes per county.
    #[clap(long, value_parser)]
    pub results: Option<String>,

    /// (default 500) The width of the canvas, in pixels.
    #[clap(long, value_parser)]
    pub width: Option<u32>,

    /// (default 500) The height of the canvas, in pixels.
    #[clap(long, value_parser)]
    pub height: Option<u32>,

    /// (file path, 'stdout' or empty) Where to write the map. By default, it is written to the
    /// standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (svg or json, default svg) The format of the output: an SVG picture or the list of draw
    /// operations in JSON.
    #[clap(long, value_parser)]
    pub output_type: Option<String>,

    /// (file path) A reference output. If provided, wimap will check that the map it draws
    /// matches the reference, and print the differences otherwise.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
