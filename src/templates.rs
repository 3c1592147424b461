//! Built-in sample document, used when the binary is invoked without an
//! input file.

/// Small fixed-size sample exercising a heading and a paragraph.
pub fn sample_document() -> &'static str {
    r##"
<html>
<body>
    <div style="width: 200px; height: 100px">
        <h1>Hello, pdf-snap!</h1>
        <p>This is an HTML-to-PDF example.</p>
    </div>
</body>
</html>
"##
}
