//! Page shell and navigation bar.

use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Sections reachable from the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Books,
    Users,
    Fines,
    Returns,
}

impl NavItem {
    const ALL: [NavItem; 4] = [NavItem::Books, NavItem::Users, NavItem::Fines, NavItem::Returns];

    fn href(&self) -> &'static str {
        match self {
            NavItem::Books => "/libros",
            NavItem::Users => "/usuarios",
            NavItem::Fines => "/multas",
            NavItem::Returns => "/devoluciones",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            NavItem::Books => "Libros",
            NavItem::Users => "Usuarios",
            NavItem::Fines => "Multas",
            NavItem::Returns => "Devoluciones",
        }
    }
}

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f9fafb; color: #111827; }
nav { background: #1e3a8a; padding: 0.75rem 1.5rem; display: flex; gap: 1.5rem; }
nav a { color: #dbeafe; text-decoration: none; font-weight: 600; }
nav a.active { color: #ffffff; border-bottom: 2px solid #ffffff; }
main { max-width: 72rem; margin: 0 auto; padding: 2rem 1rem; }
.toolbar { display: flex; justify-content: space-between; align-items: center; margin-bottom: 1.5rem; gap: 1rem; flex-wrap: wrap; }
table { width: 100%; border-collapse: collapse; background: #ffffff; }
th, td { padding: 0.75rem 1rem; border-bottom: 1px solid #d1d5db; text-align: left; vertical-align: top; }
th { background: #f3f4f6; }
th a { color: inherit; text-decoration: none; }
.btn { display: inline-block; padding: 0.5rem 1rem; border-radius: 0.375rem; border: none; color: #ffffff; background: #2563eb; text-decoration: none; cursor: pointer; }
.btn[disabled], .btn.disabled { opacity: 0.5; pointer-events: none; }
.btn-danger { background: #dc2626; }
.btn-success { background: #16a34a; }
.btn-muted { background: #6b7280; }
.badge { padding: 0.25rem 0.5rem; border-radius: 9999px; font-size: 0.875rem; }
.badge-admin { background: #dcfce7; color: #166534; }
.badge-regular { background: #f3f4f6; color: #1f2937; }
.badge-fine { background: #fee2e2; color: #991b1b; }
.flash { padding: 0.75rem 1rem; border-radius: 0.375rem; background: #fee2e2; color: #991b1b; margin-bottom: 1rem; }
.pager { display: flex; justify-content: space-between; align-items: center; margin-top: 1.5rem; }
.empty { padding: 2rem; text-align: center; color: #6b7280; }
form.inline { display: inline; }
.form-grid { display: grid; gap: 1rem; max-width: 42rem; }
.form-grid label { display: grid; gap: 0.25rem; font-weight: 500; }
.form-grid input, .form-grid textarea { padding: 0.5rem; border: 1px solid #d1d5db; border-radius: 0.375rem; }
"#;

/// Wraps page content with the document shell and navbar.
pub fn page(title: &str, active: Option<NavItem>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · Biblioteca" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                (navbar(active))
                main { (content) }
            }
        }
    }
}

fn navbar(active: Option<NavItem>) -> Markup {
    html! {
        nav {
            @for item in NavItem::ALL {
                a class=[(active == Some(item)).then_some("active")] href=(item.href()) { (item.label()) }
            }
        }
    }
}

/// Error banner; renders nothing for `None`.
pub fn flash(message: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = message {
            div.flash role="alert" { (message) }
        }
    }
}
