use crate::config::AppConfig;
use std::collections::BTreeMap;

/// Asset path prefixes the builders prepend to internal references.
#[derive(Debug, Clone, Default)]
pub struct AssetPaths {
    pub http_root: String,
    pub css_path: String,
    pub js_path: String,
    pub images_path: String,
}

impl AssetPaths {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            http_root: config.http_root.clone(),
            css_path: config.css_path.clone(),
            js_path: config.js_path.clone(),
            images_path: config.images_path.clone(),
        }
    }
}

/// Inputs for [`View::build_anchor_tag`].
#[derive(Debug, Clone, Default)]
pub struct AnchorSpec<'a> {
    pub text: &'a str,
    pub path: &'a str,
    pub is_internal: bool,
    pub target: Option<&'a str>,
    pub title: Option<&'a str>,
    pub class: Option<&'a str>,
    pub id: Option<&'a str>,
}

impl<'a> AnchorSpec<'a> {
    pub fn new(text: &'a str, path: &'a str, is_internal: bool) -> Self {
        Self {
            text,
            path,
            is_internal,
            ..Default::default()
        }
    }
}

/// Inputs for [`View::build_head_css`].
#[derive(Debug, Clone, Default)]
pub struct CssInclude {
    pub is_internal: bool,
    pub href: Option<String>,
    pub ie_conditional: Option<String>,
}

/// Inputs for [`View::build_js`].
#[derive(Debug, Clone, Default)]
pub struct JsInclude {
    pub is_internal: bool,
    pub src: Option<String>,
    pub code: Option<String>,
    pub ie_conditional: Option<String>,
}

/// Inputs for [`View::build_favicon`].
#[derive(Debug, Clone, Default)]
pub struct FaviconSpec {
    pub is_internal: bool,
    pub href: Option<String>,
    pub ie_conditional: Option<String>,
}

/// Inputs for [`View::build_branding_logo`].
#[derive(Debug, Clone, Default)]
pub struct LogoSpec {
    pub src: String,
    pub alt: String,
    pub id: Option<String>,
}

/// Inputs for [`View::build_copyright`].
#[derive(Debug, Clone, Default)]
pub struct CopyrightSpec {
    pub symbol: String,
    pub holder: String,
    pub start_year: u16,
}

/// Property map plus HTML fragment builders.
#[derive(Debug, Default)]
pub struct View {
    props: BTreeMap<String, String>,
    assets: AssetPaths,
}

impl View {
    pub fn new(assets: AssetPaths) -> Self {
        Self {
            props: BTreeMap::new(),
            assets,
        }
    }

    /// Set a named property, replacing any previous value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.props.insert(key.to_string(), value.into());
    }

    /// Append to a named property, creating it when absent.
    pub fn append(&mut self, key: &str, value: &str) {
        self.props
            .entry(key.to_string())
            .or_default()
            .push_str(value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    /// Wrap embedded markup in an IE conditional comment.
    pub fn build_ie_conditional(&self, conditional: &str, embed: &str) -> String {
        format!("<!--[if {conditional}]>{embed}<![endif]-->")
    }

    /// ` attr="value"` pairs, skipping attributes without a value.
    fn attribute_list(pairs: &[(&str, Option<&str>)]) -> String {
        let mut list = String::new();
        for (name, value) in pairs {
            if let Some(value) = value {
                if !value.is_empty() {
                    list.push_str(name);
                    list.push_str("=\"");
                    list.push_str(value);
                    list.push_str("\" ");
                }
            }
        }
        list
    }

    /// A tag wrapping `text` with optional class and id.
    pub fn build_wrapped(&self, tag: &str, text: &str, class: Option<&str>, id: Option<&str>) -> String {
        let attrs = Self::attribute_list(&[("id", id), ("class", class)]);
        if attrs.is_empty() {
            format!("<{tag}>{text}</{tag}>")
        } else {
            format!("<{tag} {attrs}>{text}</{tag}>")
        }
    }

    /// Subpage suffix appended to a page title.
    pub fn build_subpage_title(&self, sub_title: &str, separator: Option<&str>) -> String {
        format!(" {} {}", separator.unwrap_or(""), sub_title)
    }

    /// `<meta name=… content=… />` from a pre-joined type segment and value.
    pub fn build_head_meta(&self, meta_content: &str, value: &str) -> String {
        format!("<meta {meta_content} content=\"{value}\" />")
    }

    /// Anchor tag. Internal paths are prefixed with the configured HTTP root.
    pub fn build_anchor_tag(&self, spec: &AnchorSpec<'_>) -> String {
        let href = if spec.is_internal {
            format!("{}/{}", self.assets.http_root.trim_end_matches('/'), spec.path)
        } else {
            spec.path.to_string()
        };

        let target = spec.target.unwrap_or("_blank");
        let attrs = Self::attribute_list(&[
            ("href", Some(href.as_str())),
            ("target", Some(target)),
            ("title", spec.title),
            ("class", spec.class),
            ("id", spec.id),
        ]);

        format!("<a {attrs}>{}</a>", spec.text)
    }

    /// One navigation list item, optionally classed and followed by a
    /// separator span. Callers suppress the separator on the last item.
    pub fn build_nav_item(&self, nav: &str, class: Option<&str>, separator: Option<&str>) -> String {
        let separator = match separator {
            Some(s) if !s.is_empty() => format!("<span class=\"separator\">{s}</span>"),
            _ => String::new(),
        };
        self.build_wrapped("li", &format!("{nav}{separator}"), class, None)
    }

    /// CSS link tag. Internal names resolve against the CSS asset path.
    pub fn build_head_css(&self, name: &str, css: &CssInclude, cache_buster: &str) -> String {
        let tag = if css.is_internal {
            format!(
                "<link rel=\"stylesheet\" href=\"{}/{}.css{}\" />",
                self.assets.css_path, name, cache_buster
            )
        } else {
            format!(
                "<link rel=\"stylesheet\" href=\"{}{}\" />",
                css.href.as_deref().unwrap_or(""),
                cache_buster
            )
        };

        match css.ie_conditional.as_deref() {
            Some(cond) if !cond.is_empty() => self.build_ie_conditional(cond, &tag),
            _ => tag,
        }
    }

    /// Favicon link tag.
    pub fn build_favicon(&self, favicon: &FaviconSpec, cache_buster: &str) -> String {
        let href = if favicon.is_internal {
            format!("{}/favicon.ico{}", self.assets.images_path, cache_buster)
        } else {
            format!("{}{}", favicon.href.as_deref().unwrap_or(""), cache_buster)
        };
        let tag = format!("<link href=\"{href}\" rel=\"shortcut icon\" />");

        match favicon.ie_conditional.as_deref() {
            Some(cond) if !cond.is_empty() => self.build_ie_conditional(cond, &tag),
            _ => tag,
        }
    }

    /// Script tag for a JS include, inline code or src-based.
    pub fn build_js(&self, js: &JsInclude, cache_buster: &str) -> String {
        let src = match (&js.src, js.is_internal) {
            (Some(src), true) if !src.is_empty() => {
                format!("src=\"{}/{}.js{}\"", self.assets.js_path, src, cache_buster)
            }
            (Some(src), false) if !src.is_empty() => format!("src=\"{src}\""),
            _ => String::new(),
        };
        let code = js.code.as_deref().unwrap_or("");
        let tag = format!("<script {src}>{code}</script>");

        match js.ie_conditional.as_deref() {
            Some(cond) if !cond.is_empty() => self.build_ie_conditional(cond, &tag),
            _ => tag,
        }
    }

    /// Branding logo image tag.
    pub fn build_branding_logo(&self, logo: &LogoSpec) -> String {
        let src = format!("{}/{}", self.assets.images_path, logo.src);
        let attrs = Self::attribute_list(&[
            ("src", Some(src.as_str())),
            ("alt", Some(logo.alt.as_str())),
            ("id", logo.id.as_deref()),
        ]);
        format!("<img {attrs}/>")
    }

    /// Copyright list item, with a year range when the start year has passed.
    pub fn build_copyright(
        &self,
        copyright: &CopyrightSpec,
        separator: Option<&str>,
        current_year: Option<u16>,
    ) -> String {
        let mut text = format!(
            "{} {} {}",
            copyright.symbol, copyright.holder, copyright.start_year
        );
        if let Some(year) = current_year {
            if copyright.start_year < year {
                text.push_str(&format!(" - {year}"));
            }
        }

        let separator = format!(
            "<span class=\"separator\">{}</span>",
            separator.unwrap_or("")
        );
        self.build_wrapped("li", &format!("{text}{separator}"), None, None)
    }

    /// One titled column of links.
    pub fn build_link_list_column(&self, list_name: &str, links: &[(String, String)]) -> String {
        let mut items = String::new();
        for (text, path) in links {
            let anchor = self.build_anchor_tag(&AnchorSpec::new(text, path, false));
            items.push_str(&self.build_wrapped("li", &anchor, None, None));
        }
        format!("<div class=\"link-column\"><p>{list_name}</p><ul>{items}</ul></div>")
    }

    /// Assemble the full HTML document from the property map.
    ///
    /// Sections whose properties were never set are omitted rather than
    /// rendered empty.
    pub fn render_page(&self, page_name: &str) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");

        if let Some(title) = self.get("title") {
            html.push_str(&format!("<title>{title}</title>\n"));
        }
        for section in ["meta", "css", "favicon", "head_js"] {
            if let Some(fragment) = self.get(section) {
                html.push_str(fragment);
                html.push('\n');
            }
        }

        html.push_str("</head>\n<body>\n<header>\n");
        if let Some(logo) = self.get("logo") {
            html.push_str(logo);
            html.push('\n');
        }
        if let Some(nav) = self.get("header_nav") {
            html.push_str(&format!("<nav><ul>{nav}</ul></nav>\n"));
        }
        html.push_str("</header>\n");

        html.push_str(&format!("<main id=\"page-{page_name}\">\n"));
        if let Some(content) = self.get("content") {
            html.push_str(content);
            html.push('\n');
        }
        html.push_str("</main>\n<footer>\n");

        if let Some(nav) = self.get("footer_nav") {
            html.push_str(&format!("<ul>{nav}</ul>\n"));
        }
        if let Some(links) = self.get("link_section") {
            html.push_str(links);
            html.push('\n');
        }
        if let Some(js) = self.get("footer_js") {
            html.push_str(js);
            html.push('\n');
        }
        html.push_str("</footer>\n</body>\n</html>\n");

        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> View {
        View::new(AssetPaths {
            http_root: "https://example.test".into(),
            css_path: "/assets/css".into(),
            js_path: "/assets/js".into(),
            images_path: "/assets/images".into(),
        })
    }

    #[test]
    fn anchor_internal_prefixes_http_root() {
        let v = view();
        let html = v.build_anchor_tag(&AnchorSpec::new("Home", "home", true));
        assert!(html.contains("href=\"https://example.test/home\""));
        assert!(html.contains("target=\"_blank\""));
        assert!(html.ends_with(">Home</a>"));
    }

    #[test]
    fn anchor_skips_empty_attributes() {
        let v = view();
        let html = v.build_anchor_tag(&AnchorSpec::new("Out", "https://other.test", false));
        assert!(!html.contains("title="));
        assert!(!html.contains("class="));
        assert!(!html.contains("id="));
    }

    #[test]
    fn nav_item_separator_and_class() {
        let v = view();
        let html = v.build_nav_item("Home", Some("first"), Some("|"));
        assert_eq!(
            html,
            "<li class=\"first\">Home<span class=\"separator\">|</span></li>"
        );
        let last = v.build_nav_item("About", Some("last"), None);
        assert_eq!(last, "<li class=\"last\">About</li>");
    }

    #[test]
    fn meta_tag_shape() {
        let v = view();
        assert_eq!(
            v.build_head_meta("name=description", "A site"),
            "<meta name=description content=\"A site\" />"
        );
    }

    #[test]
    fn css_include_ie_conditional_wrapping() {
        let v = view();
        let css = CssInclude {
            is_internal: true,
            href: None,
            ie_conditional: Some("lt IE 9".into()),
        };
        let html = v.build_head_css("main", &css, "?abc");
        assert_eq!(
            html,
            "<!--[if lt IE 9]><link rel=\"stylesheet\" href=\"/assets/css/main.css?abc\" /><![endif]-->"
        );
    }

    #[test]
    fn copyright_year_range_only_when_started_earlier() {
        let v = view();
        let spec = CopyrightSpec {
            symbol: "©".into(),
            holder: "Example".into(),
            start_year: 2020,
        };
        let html = v.build_copyright(&spec, None, Some(2026));
        assert!(html.contains("© Example 2020 - 2026"));

        let same_year = v.build_copyright(&spec, None, Some(2020));
        assert!(same_year.contains("© Example 2020"));
        assert!(!same_year.contains(" - "));
    }

    #[test]
    fn render_page_assembles_set_sections() {
        let mut v = view();
        v.set("title", "Welcome");
        v.set("content", "<p>hello</p>");
        v.set("header_nav", "<li>Home</li>");

        let html = v.render_page("home");
        assert!(html.contains("<title>Welcome</title>"));
        assert!(html.contains("<main id=\"page-home\">"));
        assert!(html.contains("<nav><ul><li>Home</li></ul></nav>"));
        assert!(!html.contains("<footer><ul>"));
    }
}
