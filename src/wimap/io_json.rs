use serde_json::json;
use serde_json::Value as JSValue;

use crate::wimap::io_svg::shading_label;
use crate::wimap::*;

fn points_to_json(points: &[Pixel]) -> Vec<JSValue> {
    points.iter().map(|p| json!([p.x, p.y])).collect()
}

/// The draw operations as JSON, for hosts that paint on their own surface.
pub fn draw_ops_to_json(name: &str, width: u32, height: u32, ops: &[DrawOp]) -> JSValue {
    let mut l: Vec<JSValue> = Vec::new();
    for op in ops.iter() {
        let js = match op {
            DrawOp::Fill {
                region,
                points,
                color,
                shading,
            } => json!({
                "op": "fill",
                "region": region,
                "color": color.to_string(),
                "shading": shading_label(*shading),
                "points": points_to_json(points),
            }),
            DrawOp::Outline {
                region,
                points,
                color,
            } => json!({
                "op": "outline",
                "region": region,
                "color": color.to_string(),
                "points": points_to_json(points),
            }),
        };
        l.push(js);
    }
    json!({
        "name": name,
        "width": width,
        "height": height,
        "operations": l,
    })
}
