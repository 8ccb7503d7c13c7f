//! HTML view of a variant's starting position.

use std::collections::BTreeMap;

use crate::board::Province;
use crate::render::RenderVariant;

use super::hypermedia::variant_url;

/// Renders the map with the starting units and supply centers beneath it.
pub fn variant_page(variant: &RenderVariant) -> String {
    let name = variant.variant.name();
    let phase = &variant.start;
    let long_names = variant.variant.province_long_names();

    let mut page = String::new();
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!("<title>{}</title>\n", escape(name)));
    page.push_str("</head>\n<body>\n");
    page.push_str(&format!("<h1>{}</h1>\n", escape(name)));
    page.push_str(&format!(
        "<p>{} {:?} {:?}</p>\n",
        phase.year, phase.season, phase.phase_type
    ));
    page.push_str(&format!(
        "<img src=\"{}\" alt=\"{} map\">\n",
        escape(&variant_url(name, "Map.svg")),
        escape(name)
    ));

    page.push_str("<h2>Units</h2>\n<table>\n<tr><th>Province</th><th>Unit</th><th>Nation</th></tr>\n");
    for (province, unit) in &phase.units {
        let parent = province.super_province();
        page.push_str(&format!(
            "<tr><td>{} ({})</td><td>{}</td><td>{}</td></tr>\n",
            escape(long_name(&long_names, parent.as_str())),
            escape(province.as_str()),
            unit.unit_type.name(),
            escape(unit.nation.as_str())
        ));
    }
    page.push_str("</table>\n");

    page.push_str("<h2>Supply centers</h2>\n<table>\n<tr><th>Province</th><th>Owner</th></tr>\n");
    for (province, nation) in &phase.supply_centers {
        page.push_str(&format!(
            "<tr><td>{} ({})</td><td>{}</td></tr>\n",
            escape(long_name(&long_names, province.as_str())),
            escape(province.as_str()),
            escape(nation.as_str())
        ));
    }
    page.push_str("</table>\n</body>\n</html>\n");
    page
}

fn long_name<'a>(names: &'a BTreeMap<Province, String>, province: &'a str) -> &'a str {
    names.get(province).map_or(province, String::as_str)
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
