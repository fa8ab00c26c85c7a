//! Render path data through a rotated group and print the result as SVG
//! path data.
//!
//! ```text
//! cargo run --example render --features tracing -- "M2,2 h20 v20 h-20z" 48
//! ```

use vecdraw::{Element, Size, VectorDocument};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let data = args
        .next()
        .unwrap_or_else(|| "M300,70 l 0,-70 70,70 0,0 -70,70z".to_string());
    let target = match target_size(args.next().as_deref()) {
        Ok(target) => target,
        Err(report) => {
            eprintln!("{report:?}");
            std::process::exit(1);
        }
    };

    let root = Element::new("vector")
        .with_attribute("android:viewportWidth", "600")
        .with_attribute("android:viewportHeight", "600")
        .with_child(
            Element::new("group")
                .with_attribute("android:pivotX", "300")
                .with_attribute("android:pivotY", "300")
                .with_attribute("android:rotation", "45")
                .with_child(
                    Element::new("path")
                        .with_attribute("android:name", "demo")
                        .with_attribute("android:pathData", data),
                ),
        );

    let document = match VectorDocument::from_element(&root) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("{:?}", miette::Report::new(e));
            std::process::exit(1);
        }
    };

    match document.create_paths(Size::new(target, target)) {
        Ok(paths) => {
            for path in paths {
                println!("{}", path.to_svg_data());
            }
        }
        Err(e) => eprintln!("Error: {}", e),
    }
}

/// Target edge length from the second argument, 64 when absent.
fn target_size(arg: Option<&str>) -> miette::Result<f64> {
    match arg {
        Some(size) => size
            .parse::<f64>()
            .map_err(|e| miette::miette!("target size `{size}` is not a number: {e}")),
        None => Ok(64.0),
    }
}
