use crate::error::FrameworkError;
use crate::keygen::KeyClass;
use crate::model::Model;
use crate::view::{AnchorSpec, CopyrightSpec, CssInclude, FaviconSpec, JsInclude, LogoSpec, View};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};

/// A routable controller.
///
/// `methods` is the capability set the front controller checks URL method
/// segments against; `invoke` dispatches to the named method with the
/// resolved parameter list and returns the rendered page body.
pub trait Controller {
    /// Lowercase controller name, as routed in URLs.
    fn name(&self) -> &str;

    /// Methods addressable from the URL.
    fn methods(&self) -> &[&str];

    fn has_method(&self, method: &str) -> bool {
        self.methods().iter().any(|m| *m == method)
    }

    fn invoke(&mut self, method: &str, parameters: &[String]) -> Result<String, FrameworkError>;
}

/// Shared base for page controllers: one model, one view, both immutable
/// after construction, plus the helpers that move record data into view
/// properties.
pub struct PageController {
    model: Model,
    view: View,
}

impl PageController {
    pub fn new(model: Model, view: View) -> Self {
        Self { model, view }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    /// Set the page property and assemble the document.
    pub fn render(&mut self, page_name: &str) -> String {
        self.view.set("page", page_name);
        self.view.render_page(page_name)
    }

    /// Copy every string field of the head document data onto a same-named
    /// view property (`title`, `description`, …).
    pub fn set_head_doc(&mut self, head_doc: &Value) {
        if let Some(map) = head_doc.as_object() {
            for (key, value) in map {
                if let Some(text) = value.as_str() {
                    self.view.set(key, text);
                }
            }
        }
    }

    /// Build meta tags from `{content_type: {type: value}}` data.
    pub fn set_head_meta(&mut self, head_meta: &Value) {
        self.view.set("meta", "");
        let Some(map) = head_meta.as_object() else {
            return;
        };
        for (content_type, content_data) in map {
            let Some(entries) = content_data.as_object() else {
                continue;
            };
            for (meta_type, value) in entries {
                let meta_content = format!("{content_type}={meta_type}");
                let tag = self
                    .view
                    .build_head_meta(&meta_content, value.as_str().unwrap_or_default());
                self.view.append("meta", &tag);
            }
        }
    }

    /// Build CSS link tags from `{name: include-data}` entries.
    pub fn set_head_css(&mut self, css_data: &Value, cache_buster: &str) {
        self.view.set("css", "");
        let Some(map) = css_data.as_object() else {
            return;
        };
        for (name, data) in map {
            let include = CssInclude {
                is_internal: bool_field(data, "is_internal"),
                href: str_field(data, "href"),
                ie_conditional: str_field(data, "ie_conditional"),
            };
            let tag = self.view.build_head_css(name, &include, cache_buster);
            self.view.append("css", &tag);
        }
    }

    pub fn set_favicon(&mut self, favicon_data: &Value, cache_buster: &str) {
        let favicon = FaviconSpec {
            is_internal: bool_field(favicon_data, "is_internal"),
            href: str_field(favicon_data, "href"),
            ie_conditional: str_field(favicon_data, "ie_conditional"),
        };
        let tag = self.view.build_favicon(&favicon, cache_buster);
        self.view.set("favicon", tag);
    }

    pub fn set_head_js(&mut self, js_data: &Value, cache_buster: &str) {
        self.set_js_property("head_js", js_data, cache_buster);
    }

    pub fn set_footer_js(&mut self, js_data: &Value, cache_buster: &str) {
        self.set_js_property("footer_js", js_data, cache_buster);
    }

    fn set_js_property(&mut self, property: &str, js_data: &Value, cache_buster: &str) {
        self.view.set(property, "");
        let Some(map) = js_data.as_object() else {
            return;
        };
        for data in map.values() {
            let include = JsInclude {
                is_internal: bool_field(data, "is_internal"),
                src: str_field(data, "src"),
                code: str_field(data, "code"),
                ie_conditional: str_field(data, "ie_conditional"),
            };
            let tag = self.view.build_js(&include, cache_buster);
            self.view.append(property, &tag);
        }
    }

    /// Look up this page's title in the page-to-title map.
    pub fn set_head_title_page(&mut self, title_pages: &Value, key: &str) {
        if let Some(title) = title_pages.get(key).and_then(Value::as_str) {
            self.view.set("title", title);
        }
    }

    /// Cache-busting query string for includes: a preexisting value when
    /// given, otherwise a fresh 10-digit key. Empty when busting is off.
    pub fn cache_buster(&self, enabled: bool, preexisting: Option<&str>) -> String {
        if !enabled {
            return String::new();
        }
        let key = match preexisting {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => self.model.generate_key(10, &[KeyClass::Digits]),
        };
        format!("?{key}")
    }

    /// Header navigation from `{label: item-data}` entries. The first item is
    /// classed `first`, the last is classed `last` and drops the separator.
    pub fn set_header_nav(&mut self, nav_data: &Value, separator: Option<&str>) {
        self.view.set("header_nav", "");
        let Some(map) = nav_data.as_object() else {
            return;
        };

        let count = map.len();
        for (i, (label, data)) in map.iter().enumerate() {
            let (class, separator) = if i == 0 {
                (Some("first"), separator)
            } else if i + 1 == count {
                (Some("last"), None)
            } else {
                (None, separator)
            };

            let nav = if bool_field(data, "is_anchor") {
                let path = str_field(data, "path").unwrap_or_default();
                let title = str_field(data, "title");
                let target = str_field(data, "target");
                self.view.build_anchor_tag(&AnchorSpec {
                    text: label,
                    path: &path,
                    is_internal: bool_field(data, "is_internal"),
                    target: target.as_deref(),
                    title: title.as_deref(),
                    ..Default::default()
                })
            } else {
                label.clone()
            };

            let item = self.view.build_nav_item(&nav, class, separator);
            self.view.append("header_nav", &item);
        }
    }

    /// Footer navigation. The `copyright` entry renders as a copyright block;
    /// other entries render as nav items, the last without a separator.
    pub fn set_footer_nav(&mut self, nav_data: &Value, separator: Option<&str>) {
        self.view.set("footer_nav", "");
        let Some(map) = nav_data.as_object() else {
            return;
        };

        let count = map.len();
        for (i, (label, data)) in map.iter().enumerate() {
            let item = if label == "copyright" {
                let spec = CopyrightSpec {
                    symbol: str_field(data, "symbol").unwrap_or_default(),
                    holder: str_field(data, "holder").unwrap_or_default(),
                    start_year: str_field(data, "start_date")
                        .and_then(|s| s.parse().ok())
                        .unwrap_or_default(),
                };
                self.view
                    .build_copyright(&spec, separator, Some(current_year()))
            } else {
                let text = str_field(data, "text").unwrap_or_else(|| label.clone());
                let nav = if bool_field(data, "is_anchor") {
                    let path = str_field(data, "path").unwrap_or_default();
                    let title = str_field(data, "title");
                    self.view.build_anchor_tag(&AnchorSpec {
                        text: &text,
                        path: &path,
                        is_internal: bool_field(data, "is_internal"),
                        title: title.as_deref(),
                        ..Default::default()
                    })
                } else {
                    text.clone()
                };
                let separator = if i + 1 == count { None } else { separator };
                self.view.build_nav_item(&nav, None, separator)
            };

            self.view.append("footer_nav", &item);
        }
    }

    /// Branding logo wrapped in an anchor, stored under `{prefix}logo`.
    pub fn set_logo_anchor(&mut self, prefix: &str, branding: &Value) {
        let Some(logo_data) = branding.get("logo") else {
            return;
        };

        let logo = self.view.build_branding_logo(&LogoSpec {
            src: str_field(logo_data, "src").unwrap_or_default(),
            alt: str_field(logo_data, "alt").unwrap_or_default(),
            id: str_field(logo_data, "id"),
        });

        let path = str_field(logo_data, "path").unwrap_or_default();
        let title = str_field(logo_data, "title");
        let target = str_field(logo_data, "target");
        let class = str_field(logo_data, "class");
        let id = str_field(logo_data, "id");
        let anchored = self.view.build_anchor_tag(&AnchorSpec {
            text: &logo,
            path: &path,
            is_internal: bool_field(logo_data, "is_internal"),
            target: target.as_deref(),
            title: title.as_deref(),
            class: class.as_deref(),
            id: id.as_deref(),
        });

        self.view.set(&format!("{prefix}logo"), anchored);
    }

    /// Link-list columns, capped at `max_columns`.
    pub fn set_link_list_columns(&mut self, link_data: &Value, max_columns: usize) {
        self.view.set("link_section", "");
        let Some(map) = link_data.as_object() else {
            return;
        };

        for (list_name, list_data) in map.iter().take(max_columns) {
            let links: Vec<(String, String)> = list_data
                .as_object()
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(|(text, path)| {
                            path.as_str().map(|p| (text.clone(), p.to_string()))
                        })
                        .collect()
                })
                .unwrap_or_default();

            let column = self.view.build_link_list_column(list_name, &links);
            self.view.append("link_section", &column);
        }
    }

    /// Generic view property setter for one-off page data.
    pub fn set_view_property(&mut self, property: &str, data: &str) {
        self.view.set(property, data);
    }

    /// Build the basic page chrome (head document, meta, includes, footer
    /// scripts) from a template record.
    pub fn page_builder(&mut self, template: &Value, cache_buster: &str) {
        if let Some(head) = template.get("head") {
            if let Some(doc) = head.get("head_doc") {
                self.set_head_doc(doc);
            }
            if let Some(meta) = head.get("head_meta") {
                self.set_head_meta(meta);
            }
            if let Some(includes) = head.get("head_includes") {
                if let Some(css) = includes.get("head_css") {
                    self.set_head_css(css, cache_buster);
                }
                if let Some(favicon) = includes.get("favicon") {
                    self.set_favicon(favicon, cache_buster);
                }
                if let Some(js) = includes.get("head_js") {
                    self.set_head_js(js, cache_buster);
                }
            }
        }
        if let Some(js) = template.pointer("/footer/footer_js") {
            self.set_footer_js(js, cache_buster);
        }
    }
}

fn bool_field(value: &Value, key: &str) -> bool {
    match value.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true" || s == "1",
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        _ => false,
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Current year in the proleptic Gregorian calendar, derived from the system
/// clock. Falls back to the epoch year if the clock is before 1970.
pub fn current_year() -> u16 {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut days = secs / 86_400;
    let mut year: u16 = 1970;
    loop {
        let len = if is_leap(year) { 366 } else { 365 };
        if days < len {
            return year;
        }
        days -= len;
        year += 1;
    }
}

fn is_leap(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
