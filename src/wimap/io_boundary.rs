// Reader for the county boundary files.

use county_choropleth::builder::MapBuilder;

use crate::wimap::*;

/// Reads the boundary file at `path`. The resulting map is called `map_name`.
pub fn read_boundary_file(path: &str, map_name: &str) -> MapResult<BoundaryMap> {
    info!("Attempting to read boundary file {:?}", path);
    let bytes = fs::read(path).context(FileNotFoundSnafu { path })?;
    let contents = decode_boundary(&bytes, path)?;
    parse_boundary(contents, path, map_name)
}

fn decode_boundary<'a>(bytes: &'a [u8], path: &str) -> MapResult<&'a str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            let valid = &bytes[..e.valid_up_to()];
            MalformedBoundarySnafu {
                path,
                line: valid.iter().filter(|b| **b == b'\n').count() + 1,
                message: format!("invalid UTF-8 at byte {}", e.valid_up_to()),
            }
            .fail()
        }
    }
}

/// Parses the content of a boundary file. `path` is only used in error messages.
pub fn parse_boundary(contents: &str, path: &str, map_name: &str) -> MapResult<BoundaryMap> {
    let mut sc = Scanner::new(contents, path);

    let min_longitude = sc.next_f64("minimum longitude")?;
    let min_latitude = sc.next_f64("minimum latitude")?;
    let max_longitude = sc.next_f64("maximum longitude")?;
    let max_latitude = sc.next_f64("maximum latitude")?;
    let num_regions = sc.next_count("number of counties")?;
    debug!(
        "parse_boundary: bounds: {:?}, {} regions",
        (min_longitude, min_latitude, max_longitude, max_latitude),
        num_regions
    );

    let mut builder = MapBuilder::new(
        map_name,
        min_longitude,
        min_latitude,
        max_longitude,
        max_latitude,
    )
    .context(InvalidMapSnafu { path })?;

    for _ in 0..num_regions {
        // End of the previous line, then the separator line.
        sc.next_line("county separator")?;
        sc.next_line("county separator")?;
        let name = sc.next_line("county name")?.to_string();
        // State name
        sc.next_line("state name")?;

        let num_points = sc.next_count("number of points")?;
        let mut points: Vec<GeoPoint> = Vec::with_capacity(num_points.min(4096));
        for _ in 0..num_points {
            let x = sc.next_f64("longitude")?;
            let y = sc.next_f64("latitude")?;
            points.push(GeoPoint::new(x, y));
        }
        debug!("parse_boundary: region {:?}: {} points", name, points.len());
        builder
            .add_region_owned(name, points)
            .context(InvalidMapSnafu { path })?;
    }

    sc.expect_end(&format!("the {} declared counties", num_regions))?;

    Ok(builder.build())
}

// Reads the file the same way as a text scanner: tokens are separated by any
// whitespace, and reading a line returns what is left of the current line.
struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    path: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, path: &'a str) -> Scanner<'a> {
        Scanner { text, pos: 0, path }
    }

    // 1-based line number of the current position.
    fn line(&self) -> usize {
        self.text[..self.pos].matches('\n').count() + 1
    }

    fn next_token(&mut self) -> Option<&'a str> {
        let text: &'a str = self.text;
        let rest = &text[self.pos..];
        let start = rest.find(|c: char| !c.is_whitespace())?;
        let len = rest[start..]
            .find(char::is_whitespace)
            .unwrap_or(rest.len() - start);
        self.pos += start + len;
        Some(&rest[start..start + len])
    }

    fn next_line(&mut self, what: &str) -> MapResult<&'a str> {
        if self.pos >= self.text.len() {
            return self.fail(format!("missing {} (end of file)", what));
        }
        let text: &'a str = self.text;
        let rest = &text[self.pos..];
        let line = match rest.find('\n') {
            Some(idx) => {
                self.pos += idx + 1;
                &rest[..idx]
            }
            None => {
                self.pos = self.text.len();
                rest
            }
        };
        Ok(line.strip_suffix('\r').unwrap_or(line))
    }

    // Only the rest of the current line and its terminator may follow.
    fn expect_end(&mut self, what: &str) -> MapResult<()> {
        let text: &'a str = self.text;
        let rest = &text[self.pos..];
        let line_end = rest.find('\n').map_or(rest.len(), |idx| idx + 1);
        if let Some(tok) = rest[..line_end].split_whitespace().next() {
            return self.fail(format!("unexpected content {:?} after {}", tok, what));
        }
        self.pos += line_end;
        if self.pos < text.len() {
            return match text[self.pos..].split_whitespace().next() {
                Some(tok) => self.fail(format!("unexpected content {:?} after {}", tok, what)),
                None => self.fail(format!("trailing blank lines after {}", what)),
            };
        }
        Ok(())
    }

    fn expect_token(&mut self, what: &str) -> MapResult<&'a str> {
        match self.next_token() {
            Some(tok) => Ok(tok),
            None => self.fail(format!("missing {} (end of file)", what)),
        }
    }

    fn next_f64(&mut self, what: &str) -> MapResult<f64> {
        let tok = self.expect_token(what)?;
        match tok.parse::<f64>() {
            Ok(x) => Ok(x),
            Err(_) => self.fail(format!("expected {}, found {:?}", what, tok)),
        }
    }

    fn next_count(&mut self, what: &str) -> MapResult<usize> {
        let tok = self.expect_token(what)?;
        match tok.parse::<usize>() {
            Ok(x) => Ok(x),
            Err(_) => self.fail(format!(
                "expected {} (a non-negative integer), found {:?}",
                what, tok
            )),
        }
    }

    fn fail<T>(&self, message: String) -> MapResult<T> {
        MalformedBoundarySnafu {
            path: self.path,
            line: self.line(),
            message,
        }
        .fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_COUNTIES: &str = "-92.0 42.0 -87.0 47.0
2

Adams
WI
3
-90.0 44.0
-89.5 44.0
-89.5 44.5

Fond du Lac
WI
4
-88.5 43.5 -88.0 43.5
-88.0 43.9
-88.5 43.9
";

    fn parse(text: &str) -> MapResult<BoundaryMap> {
        parse_boundary(text, "test.txt", DEFAULT_MAP_NAME)
    }

    #[test]
    fn counts_match_declarations() {
        let map = parse(TWO_COUNTIES).unwrap();
        assert_eq!(map.name(), DEFAULT_MAP_NAME);
        assert_eq!(map.regions().len(), 2);
        assert_eq!(map.regions()[0].name(), "Adams");
        assert_eq!(map.regions()[0].points().len(), 3);
        // Names are whole lines.
        assert_eq!(map.regions()[1].name(), "Fond du Lac");
        assert_eq!(map.regions()[1].points().len(), 4);
        assert_eq!(map.regions()[1].points()[1], GeoPoint::new(-88.0, 43.5));
        assert_eq!(map.min_longitude(), -92.0);
        assert_eq!(map.min_latitude(), 42.0);
        assert_eq!(map.max_longitude(), -87.0);
        assert_eq!(map.max_latitude(), 47.0);
    }

    #[test]
    fn windows_line_endings() {
        let text = TWO_COUNTIES.replace('\n', "\r\n");
        let map = parse(&text).unwrap();
        assert_eq!(map, parse(TWO_COUNTIES).unwrap());
    }

    #[test]
    fn trailing_blank_lines_are_rejected() {
        let text = format!("{}\n\n   \n", TWO_COUNTIES);
        match parse(&text) {
            Err(MapError::MalformedBoundary { line, message, .. }) => {
                assert!(message.contains("blank lines"), "{}", message);
                assert_eq!(line, 17);
            }
            x => panic!("unexpected result {:?}", x),
        }

        let text = "-92.0 42.0 -87.0 47.0\n1\n\nAdams\nWI\n1\n-90.0 44.0\n\n\n\n";
        assert!(matches!(
            parse(text),
            Err(MapError::MalformedBoundary { .. })
        ));
    }

    #[test]
    fn final_line_terminator_is_optional() {
        let text = TWO_COUNTIES.trim_end_matches('\n');
        assert_eq!(parse(text).unwrap(), parse(TWO_COUNTIES).unwrap());
        // Spaces before the last terminator are fine.
        let text = format!("{} \t\r\n", text);
        assert_eq!(parse(&text).unwrap().regions().len(), 2);
    }

    #[test]
    fn content_after_the_last_point_is_rejected() {
        let text = TWO_COUNTIES.replace("-88.5 43.9\n", "-88.5 43.9 12\n");
        match parse(&text) {
            Err(MapError::MalformedBoundary { line, message, .. }) => {
                assert!(message.contains("\"12\""), "{}", message);
                assert_eq!(line, 16);
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn trailing_content_is_rejected() {
        let text = format!("{}\nDane\n", TWO_COUNTIES);
        let res = parse(&text);
        assert!(matches!(res, Err(MapError::MalformedBoundary { .. })));
    }

    #[test]
    fn truncated_record_is_rejected() {
        // The second county announces 4 points but only has 3.
        let text = TWO_COUNTIES.replace("-88.5 43.9\n", "");
        match parse(&text) {
            Err(MapError::MalformedBoundary { line, message, .. }) => {
                assert!(message.contains("longitude"), "{}", message);
                assert_eq!(line, 15);
            }
            x => panic!("unexpected result {:?}", x),
        }
    }

    #[test]
    fn missing_counties_are_rejected() {
        let text = TWO_COUNTIES.replacen("\n2\n", "\n3\n", 1);
        assert!(matches!(
            parse(&text),
            Err(MapError::MalformedBoundary { .. })
        ));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let text = TWO_COUNTIES.replace("-89.5 44.0", "-89.5 north");
        match parse(&text) {
            Err(MapError::MalformedBoundary { line, message, .. }) => {
                assert_eq!(line, 8);
                assert!(message.contains("north"), "{}", message);
            }
            x => panic!("unexpected result {:?}", x),
        }
        let text = TWO_COUNTIES.replacen("\n3\n", "\n-3\n", 1);
        assert!(matches!(
            parse(&text),
            Err(MapError::MalformedBoundary { .. })
        ));
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        let text = TWO_COUNTIES.replacen("-92.0 42.0 -87.0 47.0", "-92.0 42.0 -92.0 47.0", 1);
        assert!(matches!(parse(&text), Err(MapError::InvalidMap { .. })));
    }

    #[test]
    fn missing_file() {
        let res = read_boundary_file("/nonexistent/WI.txt", DEFAULT_MAP_NAME);
        assert!(matches!(res, Err(MapError::FileNotFound { .. })));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let mut bytes = TWO_COUNTIES.as_bytes().to_vec();
        // "Adams" becomes "Ad\xe9ms" on line 4.
        bytes[27] = 0xe9;
        match decode_boundary(&bytes, "test.txt") {
            Err(MapError::MalformedBoundary { line, message, .. }) => {
                assert_eq!(line, 4);
                assert!(message.contains("UTF-8"), "{}", message);
            }
            x => panic!("unexpected result {:?}", x),
        }
        assert_eq!(
            decode_boundary(TWO_COUNTIES.as_bytes(), "test.txt").unwrap(),
            TWO_COUNTIES
        );
    }

    #[test]
    fn reading_twice_gives_the_same_map() {
        let path = format!("{}/tests/data/tiny_map.txt", env!("CARGO_MANIFEST_DIR"));
        let first = read_boundary_file(&path, DEFAULT_MAP_NAME).unwrap();
        let second = read_boundary_file(&path, DEFAULT_MAP_NAME).unwrap();
        assert_eq!(first, second);
        let names: Vec<&str> = first.regions().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Adams", "Brown", "Calumet"]);
    }
}
