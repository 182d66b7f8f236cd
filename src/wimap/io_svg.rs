// Writes draw operations as an SVG document.

use crate::wimap::*;

fn escape_xml(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&apos;"),
            _ => res.push(c),
        }
    }
    res
}

fn svg_points(points: &[Pixel]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn shading_label(shading: Shading) -> &'static str {
    match shading {
        Shading::Votes => "votes",
        Shading::NoVotes => "no_votes",
        Shading::MissingResults => "missing_results",
    }
}

/// One `<polygon>` per operation, in order, so that outlines are painted over fills.
pub fn draw_ops_to_svg(name: &str, width: u32, height: u32, ops: &[DrawOp]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(ops.len() + 3);
    lines.push(format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = width,
        h = height
    ));
    lines.push(format!("<title>{}</title>", escape_xml(name)));
    for op in ops {
        let line = match op {
            DrawOp::Fill {
                region,
                points,
                color,
                shading,
            } => format!(
                "<polygon class=\"{}\" points=\"{}\" fill=\"{}\"><title>{}</title></polygon>",
                shading_label(*shading),
                svg_points(points),
                color,
                escape_xml(region)
            ),
            DrawOp::Outline { points, color, .. } => format!(
                "<polygon points=\"{}\" fill=\"none\" stroke=\"{}\"/>",
                svg_points(points),
                color
            ),
        };
        lines.push(line);
    }
    lines.push("</svg>".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_and_outline() {
        let points = vec![Pixel { x: 10, y: 10 }, Pixel { x: 20, y: 10 }, Pixel { x: 20, y: 30 }];
        let ops = vec![
            DrawOp::Fill {
                region: "Eau Claire".to_string(),
                points: points.clone(),
                color: Rgb::new(204, 13, 38),
                shading: Shading::Votes,
            },
            DrawOp::Outline {
                region: "Eau Claire".to_string(),
                points,
                color: Rgb::BLACK,
            },
        ];
        let svg = draw_ops_to_svg("Results & more", 40, 50, &ops);
        let expected = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"40\" height=\"50\" viewBox=\"0 0 40 50\">
<title>Results &amp; more</title>
<polygon class=\"votes\" points=\"10,10 20,10 20,30\" fill=\"#cc0d26\"><title>Eau Claire</title></polygon>
<polygon points=\"10,10 20,10 20,30\" fill=\"none\" stroke=\"#000000\"/>
</svg>";
        assert_eq!(svg, expected);
    }

    #[test]
    fn names_are_escaped() {
        assert_eq!(escape_xml("St. Croix <\"x\">"), "St. Croix &lt;&quot;x&quot;&gt;");
    }
}
