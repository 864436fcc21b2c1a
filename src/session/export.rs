// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Inkdown-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Inkdown and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fixed HTML document template for exports.

const EXPORT_STYLE: &str = "\
body{max-width:48rem;margin:2rem auto;padding:0 1rem;\
font-family:-apple-system,'Segoe UI',Roboto,'Helvetica Neue',sans-serif;\
line-height:1.6;color:#24292f}\
h1,h2{border-bottom:1px solid #d8dee4;padding-bottom:.3em}\
pre{background:#f6f8fa;padding:1em;overflow-x:auto;border-radius:6px}\
code{background:#f6f8fa;padding:.2em .4em;border-radius:6px;\
font-family:ui-monospace,'SF Mono',Menlo,Consolas,monospace;font-size:85%}\
pre code{padding:0;background:none}\
blockquote{margin:0;padding-left:1em;border-left:.25em solid #d8dee4;color:#57606a}\
table{border-collapse:collapse}\
th,td{border:1px solid #d8dee4;padding:.4em .8em}\
img{max-width:100%}";

/// Wraps an already-rendered HTML body in the export template.
///
/// Both `title` and `body` are inserted verbatim; the caller owns whatever
/// escaping it wants (the editor performs none).
pub fn wrap_html_document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>{title}</title>\
<style>{EXPORT_STYLE}</style></head><body>{body}</body></html>"
    )
}
