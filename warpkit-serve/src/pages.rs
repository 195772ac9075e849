use axum::response::Html;

/// The upload form served at the root route.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Image Transformation Service</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
        }
        form {
            background-color: #f5f5f5;
            padding: 20px;
            border-radius: 5px;
        }
        fieldset {
            border: 1px solid #ddd;
            border-radius: 4px;
            margin: 15px 0;
        }
        label {
            display: block;
            margin-bottom: 10px;
        }
        button {
            background-color: #4CAF50;
            color: white;
            padding: 10px 15px;
            border: none;
            border-radius: 4px;
            cursor: pointer;
        }
    </style>
</head>
<body>
    <h1>Image Transformation Service</h1>
    <p>Upload an image and pick the transformations to apply.</p>

    <form action="/process" method="post" enctype="multipart/form-data">
        <label for="image">Image:</label>
        <input type="file" id="image" name="image" accept="image/*" required>

        <fieldset>
            <legend>Transformations</legend>
            <label><input type="checkbox" name="transformations" value="translate"> Translate</label>
            <label><input type="checkbox" name="transformations" value="rotate"> Rotate</label>
            <label><input type="checkbox" name="transformations" value="scale"> Scale</label>
            <label><input type="checkbox" name="transformations" value="shear"> Shear</label>
            <label><input type="checkbox" name="transformations" value="flip"> Flip</label>
            <label><input type="checkbox" name="transformations" value="crop"> Crop</label>
            <label><input type="checkbox" name="transformations" value="perspective"> Perspective</label>
        </fieldset>

        <button type="submit">Process</button>
    </form>
</body>
</html>"#;

/// Handler for the root endpoint.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Render the results page with one entry per transformed image.
pub fn results_page(results: &[(&'static str, String)]) -> String {
    let mut figures = String::new();
    for (name, url) in results {
        figures.push_str(&format!(
            r#"        <figure>
            <figcaption>{name}</figcaption>
            <img src="{url}" alt="{name}">
        </figure>
"#
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Transformation Results</title>
    <style>
        body {{
            font-family: Arial, sans-serif;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
        }}
        figure {{
            margin: 20px 0;
        }}
        figcaption {{
            font-weight: bold;
            margin-bottom: 5px;
        }}
        img {{
            max-width: 100%;
        }}
    </style>
</head>
<body>
    <h1>Transformation Results</h1>
{figures}    <p><a href="/">Back</a></p>
</body>
</html>
"#
    )
}
