use common::{IoPriority, SpeedRequirement, TaskType, cache_usage_label};
use form_core::{FormView, labels};

pub const PAGE_TITLE: &str = "스토리지 최적화 입력";

/// Renders the application shell: the fixed heading plus one form.
pub fn app_html(view: &FormView) -> String {
    format!(
        r#"<!doctype html>
<html lang="ko">
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>{title}</title>
    <style>
                body {{ font-family: system-ui, sans-serif; margin: 1.5rem; background: #fafafa; }}
                main {{ max-width: 760px; margin: 0 auto; }}
                form, .response {{ background: #fff; border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }}
                form div {{ margin-bottom: 0.6rem; }}
                label {{ font-weight: 600; }}
                input, select, button {{ font: inherit; }}
                button {{ padding: 0.5rem 0.8rem; border: 1px solid #888; border-radius: 6px; background: #f5f5f5; cursor: pointer; }}
                .error {{ color: #b00020; }}
    </style>
</head>
<body>
    <main class="App">
        <h1>{title}</h1>
{form}
    </main>
    <script>
        const pendingSyncs = [];

        function syncField(control) {{
            const value = control.type === 'checkbox' ? control.checked : control.value;
            if (control.type === 'checkbox') {{
                document.getElementById('cache-caption').textContent = value ? '활성화' : '비활성화';
            }}
            const request = fetch('/api/field', {{
                method: 'POST',
                headers: {{ 'content-type': 'application/json' }},
                body: JSON.stringify({{ field: control.dataset.field, value }})
            }}).catch(function (err) {{
                console.warn('field sync failed', err);
            }});
            pendingSyncs.push(request);
        }}

        document.querySelectorAll('[data-field]').forEach(function (control) {{
            control.addEventListener('input', function () {{ syncField(control); }});
        }});

        document.getElementById('optimize-form').addEventListener('submit', async function (event) {{
            event.preventDefault();
            const outcome = document.getElementById('outcome');
            outcome.querySelectorAll('.error').forEach(function (node) {{ node.remove(); }});
            if (!outcome.querySelector('.loading')) {{
                outcome.insertAdjacentHTML('afterbegin', '<p class="loading">{loading}</p>');
            }}
            try {{
                await Promise.all(pendingSyncs.splice(0));
                const response = await fetch('/outcome', {{ method: 'POST' }});
                if (!response.ok) {{
                    throw new Error('HTTP ' + response.status);
                }}
                outcome.innerHTML = await response.text();
            }} catch (err) {{
                const line = document.createElement('div');
                line.className = 'error';
                line.textContent = '{error}: ' + err.message;
                outcome.replaceChildren(line);
            }}
        }});
    </script>
</body>
</html>
"#,
        title = PAGE_TITLE,
        form = form_html(view),
        loading = labels::LOADING,
        error = labels::ERROR,
    )
}

/// Renders the input controls followed by the outcome container.
///
/// Without scripts the form falls back to a full-page post to `/`.
pub fn form_html(view: &FormView) -> String {
    let input = &view.input;
    let mut html = String::new();

    html.push_str("        <form id=\"optimize-form\" method=\"post\" action=\"/\">\n");
    html.push_str(&text_control(
        "dataSize",
        labels::DATA_SIZE,
        &input.data_size,
        labels::DATA_SIZE_PLACEHOLDER,
    ));
    html.push_str(&text_control(
        "readWriteRatio",
        labels::READ_WRITE_RATIO,
        &input.read_write_ratio,
        labels::READ_WRITE_RATIO_PLACEHOLDER,
    ));
    html.push_str(&select_control(
        "taskType",
        labels::TASK_TYPE,
        input.task_type.as_str(),
        TaskType::ALL.map(TaskType::as_str).as_slice(),
    ));
    html.push_str(&select_control(
        "speedRequirement",
        labels::SPEED_REQUIREMENT,
        input.speed_requirement.as_str(),
        SpeedRequirement::ALL.map(SpeedRequirement::as_str).as_slice(),
    ));
    html.push_str(&format!(
        "            <div>\n                <label>{label}: </label>\n                <input type=\"checkbox\" name=\"cacheUsage\" value=\"true\" data-field=\"cacheUsage\"{checked} />\n                <span id=\"cache-caption\">{caption}</span>\n            </div>\n",
        label = labels::CACHE_USAGE,
        checked = if input.cache_usage { " checked" } else { "" },
        caption = cache_usage_label(input.cache_usage),
    ));
    html.push_str(&select_control(
        "ioPriority",
        labels::IO_PRIORITY,
        input.io_priority.as_str(),
        IoPriority::ALL.map(IoPriority::as_str).as_slice(),
    ));
    html.push_str(&format!(
        "            <button type=\"submit\">{}</button>\n        </form>\n",
        labels::SUBMIT
    ));
    html.push_str("        <div id=\"outcome\">\n");
    html.push_str(&outcome_html(view));
    html.push_str("        </div>\n");

    html
}

/// The loading line, the result block or the error line, depending on the
/// lifecycle. Served alone by `/outcome` for in-page submits.
pub fn outcome_html(view: &FormView) -> String {
    let mut html = String::new();

    if view.loading {
        html.push_str(&format!("        <p class=\"loading\">{}</p>\n", labels::LOADING));
    }

    if let Some(result) = &view.result {
        html.push_str("        <div class=\"response\">\n");
        html.push_str(&format!("            <h2>{}</h2>\n", labels::RESULT_HEADING));
        html.push_str(&format!(
            "            <p><strong>{}:</strong> {}</p>\n",
            labels::PREDICTED_IOPS,
            escape_html(&result.predicted_iops)
        ));
        html.push_str(&format!(
            "            <p><strong>{}:</strong></p>\n            <ul>\n",
            labels::OPTIMIZED_SETTINGS
        ));
        for setting in &result.settings {
            html.push_str(&format!(
                "                <li>{}: {}</li>\n",
                setting.label,
                escape_html(&setting.value)
            ));
        }
        html.push_str(&format!(
            "            </ul>\n            <p><strong>{}:</strong></p>\n            <ul class=\"recommendations\">\n",
            labels::RECOMMENDATIONS
        ));
        for item in &result.recommendations {
            html.push_str(&format!("                <li>{}</li>\n", escape_html(item)));
        }
        html.push_str("            </ul>\n        </div>\n");
    }

    if let Some(error) = &view.error {
        html.push_str(&format!(
            "        <div class=\"error\">{}: {}</div>\n",
            labels::ERROR,
            escape_html(error)
        ));
    }

    html
}

fn text_control(name: &str, label: &str, value: &str, placeholder: &str) -> String {
    format!(
        "            <div>\n                <label>{label}: </label>\n                <input type=\"text\" name=\"{name}\" data-field=\"{name}\" value=\"{value}\" placeholder=\"{placeholder}\" />\n            </div>\n",
        value = escape_html(value),
    )
}

fn select_control(name: &str, label: &str, selected: &str, options: &[&str]) -> String {
    let mut html = format!(
        "            <div>\n                <label>{label}: </label>\n                <select name=\"{name}\" data-field=\"{name}\">\n"
    );
    for option in options {
        let marker = if *option == selected { " selected" } else { "" };
        html.push_str(&format!(
            "                    <option value=\"{option}\"{marker}>{option}</option>\n"
        ));
    }
    html.push_str("                </select>\n            </div>\n");
    html
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
