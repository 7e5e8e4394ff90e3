use actix_web::{web, HttpResponse, Responder};
use crate::models::Feature;
use crate::routes::predict::{AppState, ModelStatus};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index));
}

/// Form page
///
/// Without a loaded model the page carries only the load error and no
/// prediction controls.
async fn index(state: web::Data<AppState>) -> impl Responder {
    let body = match &state.model {
        ModelStatus::Ready(_) => render_form(&state.ui.title),
        ModelStatus::Unavailable(reason) => render_unavailable(&state.ui.title, reason),
    };

    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 60rem; margin: 2rem auto; }}
.error {{ color: #b00020; background: #fdecea; padding: .75rem; }}
label {{ display: block; margin-top: .5rem; }}
table {{ border-collapse: collapse; margin-top: 1rem; }}
td, th {{ border: 1px solid #ccc; padding: .25rem .5rem; }}
</style>
</head>
<body>
<h1>{title}</h1>
{content}
</body>
</html>
"#,
        title = escape_html(title),
        content = content,
    )
}

fn render_unavailable(title: &str, reason: &str) -> String {
    page(
        title,
        &format!(
            r#"<p class="error" id="model-error">Model could not be loaded. {}</p>"#,
            escape_html(reason)
        ),
    )
}

fn render_form(title: &str) -> String {
    let inputs: String = Feature::ALL
        .iter()
        .map(|f| {
            let bounds = f.bounds();
            let max = bounds
                .max
                .map(|m| format!(r#" max="{}""#, m))
                .unwrap_or_default();
            format!(
                r#"<label>{label} <input type="number" name="{name}" min="{min}"{max} value="{default}" required></label>
"#,
                label = escape_html(f.label()),
                name = escape_html(f.column_name()),
                min = bounds.min,
                max = max,
                default = bounds.default,
            )
        })
        .collect();

    let content = format!(
        r#"<section>
<label>Upload your CSV file <input type="file" id="csv-file" accept=".csv,text/csv"></label>
<div id="csv-preview"></div>
<button type="button" id="predict-csv">Predict from CSV</button>
<div id="csv-result"></div>
</section>
<p>Or, enter data manually:</p>
<form id="manual-form">
{inputs}<button type="submit">Predict Manually</button>
</form>
<div id="manual-result"></div>
<script>
const api = "/api/v1";
function esc(s) {{ return String(s).replace(/[&<>"']/g, c => ({{"&":"&amp;","<":"&lt;",">":"&gt;","\"":"&quot;","'":"&#39;"}})[c]); }}
function showError(el, body) {{ el.innerHTML = '<p class="error">' + esc(body.message || "Request failed") + '</p>'; }}
function renderTable(el, caption, t) {{
  let html = '<h3>' + esc(caption) + '</h3><table><tr>' + t.columns.map(c => '<th>' + esc(c) + '</th>').join('') + '</tr>';
  for (const row of t.rows) {{ html += '<tr>' + row.map(v => '<td>' + esc(v === null ? '' : v) + '</td>').join('') + '</tr>'; }}
  el.innerHTML = html + '</table>';
}}
async function post(path, body, type) {{
  const resp = await fetch(api + path, {{ method: "POST", headers: {{ "Content-Type": type }}, body }});
  return {{ ok: resp.ok, body: await resp.json() }};
}}
let csvText = null;
document.getElementById("csv-file").addEventListener("change", async ev => {{
  const file = ev.target.files[0];
  if (!file) return;
  csvText = await file.text();
  const el = document.getElementById("csv-preview");
  const r = await post("/upload/preview", csvText, "text/csv");
  r.ok ? renderTable(el, "Uploaded Data", r.body) : showError(el, r.body);
}});
document.getElementById("predict-csv").addEventListener("click", async () => {{
  const el = document.getElementById("csv-result");
  if (csvText === null) {{ showError(el, {{ message: "Upload a CSV file first" }}); return; }}
  const r = await post("/predict/csv", csvText, "text/csv");
  r.ok ? renderTable(el, "Prediction Results", r.body) : showError(el, r.body);
}});
document.getElementById("manual-form").addEventListener("submit", async ev => {{
  ev.preventDefault();
  const payload = {{}};
  for (const input of ev.target.querySelectorAll("input")) {{ payload[input.name] = Number(input.value); }}
  const el = document.getElementById("manual-result");
  const r = await post("/predict/manual", JSON.stringify(payload), "application/json");
  r.ok ? el.innerHTML = '<p>' + esc(r.body.formatted) + '</p>' : showError(el, r.body);
}});
</script>
"#,
        inputs = inputs,
    );

    page(title, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href=\"x\">&</a>"), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_form_has_every_field() {
        let html = render_form("House Price Prediction");
        for feature in Feature::ALL {
            assert!(html.contains(&format!("name=\"{}\"", escape_html(feature.column_name()))));
        }
        assert!(html.contains(r#"max="2023""#));
        assert!(html.contains("Predict Manually"));
    }

    #[test]
    fn test_unavailable_page_has_no_controls() {
        let html = render_unavailable("House Price Prediction", "No such file <x>");
        assert!(html.contains("Model could not be loaded."));
        assert!(html.contains("&lt;x&gt;"));
        assert!(!html.contains("<form"));
        assert!(!html.contains("Predict from CSV"));
    }
}
