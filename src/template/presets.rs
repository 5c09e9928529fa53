use crate::assets::color::Color;
use crate::template::{Backdrop, DeviceKind, Orientation, Template};

/// A named entry of the built-in template catalog.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NamedTemplate {
    pub name: &'static str,
    pub description: &'static str,
    pub template: Template,
}

fn hex(s: &str) -> Color {
    Color::from_hex(s).unwrap_or(Color::BLACK)
}

/// Built-in templates in gallery order.
pub fn builtin_templates() -> Vec<NamedTemplate> {
    vec![
        NamedTemplate {
            name: "flat-indigo",
            description: "Flat card on an indigo to violet gradient",
            template: Template::flat(Backdrop::gradient(
                [hex("#667eea"), hex("#764ba2")],
                135.0,
            )),
        },
        NamedTemplate {
            name: "flat-sunset",
            description: "Flat card on a warm three-stop gradient",
            template: Template::flat(Backdrop::gradient(
                [hex("#ff7e5f"), hex("#feb47b"), hex("#ffcc70")],
                45.0,
            )),
        },
        NamedTemplate {
            name: "flat-mono",
            description: "Flat card on a black to white gradient",
            template: Template::flat(Backdrop::gradient(
                [hex("#000000"), hex("#ffffff")],
                0.0,
            )),
        },
        NamedTemplate {
            name: "flat-slate",
            description: "Flat card on a solid slate backdrop",
            template: Template::flat(Backdrop::solid(hex("#1e293b"))),
        },
        NamedTemplate {
            name: "phone-portrait",
            description: "Phone frame, portrait",
            template: Template::device(DeviceKind::phone(Orientation::Portrait)),
        },
        NamedTemplate {
            name: "phone-landscape",
            description: "Phone frame rotated to landscape",
            template: Template::device(DeviceKind::phone(Orientation::Landscape)),
        },
        NamedTemplate {
            name: "tablet",
            description: "Tablet frame, landscape",
            template: Template::device(DeviceKind::tablet()),
        },
        NamedTemplate {
            name: "laptop",
            description: "Laptop with lid, hinge and keyboard base",
            template: Template::device(DeviceKind::Laptop),
        },
        NamedTemplate {
            name: "browser",
            description: "Desktop browser window chrome",
            template: Template::device(DeviceKind::BrowserWindow)
                .with_background(Backdrop::gradient([hex("#e0eafc"), hex("#cfdef3")], 90.0)),
        },
    ]
}

/// Look up a built-in template by name.
pub fn template_by_name(name: &str) -> Option<Template> {
    builtin_templates()
        .into_iter()
        .find(|t| t.name == name)
        .map(|t| t.template)
}
