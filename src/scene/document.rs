//! Retained-mode SVG document.
//!
//! A root container plus a stack of open groups. Shapes are appended to
//! whichever container is on top of the stack.

use super::style::Style;
use crate::utils::config::SVG_NAMESPACE;
use log::warn;
use std::borrow::Cow;

/// A drawable primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: Style,
        /// Rendered as a `<title>` child, i.e. a hover tooltip
        title: Option<String>,
    },
    Text {
        x: f64,
        y: f64,
        text: String,
        style: Style,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: Style,
    },
    Group {
        style: Style,
        children: Vec<Element>,
    },
}

impl Element {
    pub fn is_rect(&self) -> bool {
        matches!(self, Self::Rect { .. })
    }

    /// Tooltip of a rectangle
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Rect { title, .. } => title.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Container {
    style: Style,
    children: Vec<Element>,
}

/// SVG scene under construction
#[derive(Debug, Clone)]
pub struct Scene {
    // stack[0] is the document root and is never popped
    stack: Vec<Container>,
    width: f64,
    height: f64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            stack: vec![Container::default()],
            width: 0.0,
            height: 0.0,
        }
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Set the root bounding box
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        style: Style,
        title: Option<&str>,
    ) {
        self.append(Element::Rect {
            x,
            y,
            width,
            height,
            style,
            title: title.filter(|t| !t.is_empty()).map(str::to_string),
        });
    }

    pub fn text(&mut self, x: f64, y: f64, text: impl Into<String>, style: Style) {
        self.append(Element::Text {
            x,
            y,
            text: text.into(),
            style,
        });
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: Style) {
        self.append(Element::Line {
            x1,
            y1,
            x2,
            y2,
            style,
        });
    }

    /// Open a `<g>` group; later shapes go inside it until [`Scene::end_group`]
    pub fn begin_group(&mut self, style: Style) {
        self.stack.push(Container {
            style,
            children: Vec::new(),
        });
    }

    /// Close the innermost group
    pub fn end_group(&mut self) {
        if self.stack.len() == 1 {
            warn!("end_group called with no open group");
            return;
        }
        if let Some(group) = self.stack.pop() {
            self.append(Element::Group {
                style: group.style,
                children: group.children,
            });
        }
    }

    fn append(&mut self, element: Element) {
        if let Some(top) = self.stack.last_mut() {
            top.children.push(element);
        }
    }

    /// Top-level elements of the document
    pub fn elements(&self) -> &[Element] {
        &self.stack[0].children
    }

    /// Rectangles anywhere in the document, in document order
    pub fn rects(&self) -> Vec<&Element> {
        let mut found = Vec::new();
        for container in &self.stack {
            collect_rects(&container.children, &mut found);
        }
        found
    }

    /// Serialize to an SVG document string
    ///
    /// Groups still open are written as if they had been closed.
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version='1.0' encoding='UTF-8'?>\n");
        out.push_str(&format!(
            r#"<svg xmlns="{}" width="{}" height="{}">"#,
            SVG_NAMESPACE,
            fmt_num(self.width),
            fmt_num(self.height)
        ));
        out.push('\n');

        for (depth, container) in self.stack.iter().enumerate() {
            if depth > 0 {
                write_group_open(&mut out, &container.style);
            }
            for element in &container.children {
                write_element(&mut out, element);
            }
        }
        for _ in 1..self.stack.len() {
            out.push_str("</g>\n");
        }

        out.push_str("</svg>\n");
        out
    }
}

fn collect_rects<'a>(elements: &'a [Element], found: &mut Vec<&'a Element>) {
    for element in elements {
        if element.is_rect() {
            found.push(element);
        } else if let Element::Group { children, .. } = element {
            collect_rects(children, found);
        }
    }
}

fn write_element(out: &mut String, element: &Element) {
    match element {
        Element::Rect {
            x,
            y,
            width,
            height,
            style,
            title,
        } => {
            out.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                fmt_num(*x),
                fmt_num(*y),
                fmt_num(*width),
                fmt_num(*height)
            ));
            write_style(out, style);
            match title {
                Some(title) => out.push_str(&format!(
                    "><title>{}</title></rect>\n",
                    escape_xml(title)
                )),
                None => out.push_str(" />\n"),
            }
        }
        Element::Text { x, y, text, style } => {
            out.push_str(&format!(r#"<text x="{}" y="{}""#, fmt_num(*x), fmt_num(*y)));
            write_style(out, style);
            if text.is_empty() {
                out.push_str(" />\n");
            } else {
                out.push_str(&format!(">{}</text>\n", escape_xml(text)));
            }
        }
        Element::Line {
            x1,
            y1,
            x2,
            y2,
            style,
        } => {
            out.push_str(&format!(
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#,
                fmt_num(*x1),
                fmt_num(*y1),
                fmt_num(*x2),
                fmt_num(*y2)
            ));
            write_style(out, style);
            out.push_str(" />\n");
        }
        Element::Group { style, children } => {
            write_group_open(out, style);
            for child in children {
                write_element(out, child);
            }
            out.push_str("</g>\n");
        }
    }
}

fn write_group_open(out: &mut String, style: &Style) {
    out.push_str("<g");
    write_style(out, style);
    out.push_str(">\n");
}

// Empty styles are omitted entirely
fn write_style(out: &mut String, style: &Style) {
    if !style.is_empty() {
        out.push_str(&format!(r#" style="{}""#, escape_xml(&style.to_string())));
    }
}

/// Shortest decimal form that round-trips (`5`, `1.5`, `0.3333333333333333`)
pub fn fmt_num(value: f64) -> String {
    format!("{}", value)
}

/// Escape text for use in XML content and attribute values
pub fn escape_xml(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }

    let mut escaped = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<lambda>"), "&lt;lambda&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert!(matches!(escape_xml("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new();
        assert_eq!(
            scene.to_svg_string(),
            "<?xml version='1.0' encoding='UTF-8'?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"0\" height=\"0\">\n\
             </svg>\n"
        );
    }

    #[test]
    fn test_groups_nest() {
        let mut scene = Scene::new();
        scene.begin_group(Style::new().set("opacity", 0.5));
        scene.rect(0.0, 0.0, 1.0, 1.0, Style::new(), Some("inner"));
        scene.end_group();
        scene.rect(2.0, 0.0, 1.0, 1.0, Style::new(), None);

        assert_eq!(scene.elements().len(), 2);
        assert_eq!(scene.rects().len(), 2);
        assert_eq!(scene.rects()[0].title(), Some("inner"));
    }

    #[test]
    fn test_end_group_on_root_is_noop() {
        let mut scene = Scene::new();
        scene.line(0.0, 0.0, 1.0, 1.0, Style::new());
        scene.end_group();
        assert_eq!(scene.elements().len(), 1);
    }

    #[test]
    fn test_open_group_serialized_closed() {
        let mut scene = Scene::new();
        scene.begin_group(Style::new());
        scene.text(1.0, 2.0, "x", Style::new());
        let svg = scene.to_svg_string();
        assert!(svg.contains("<g>\n<text x=\"1\" y=\"2\">x</text>\n</g>\n</svg>"));
    }
}
