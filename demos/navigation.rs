//! Walk a navigation panel through its states on an in-memory page.
//!
//! Run with `cargo run --example navigation --features test-helpers`.

use site_enhance::infrastructure::logging;
use site_enhance::infrastructure::mocks::VirtualTime;
use site_enhance::{Document, Enhancer, EnhancerConfig, Key, MemoryDocument, Modifiers};
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("site_enhance=debug")?;

    let doc = Rc::new(MemoryDocument::new().with_path("/diensten/").with_viewport_width(640));
    let header = doc.append(doc.body(), "header", &[("class", "l-header")]);
    let nav = doc.append(header, "nav", &[("class", "c-nav"), ("id", "main-nav")]);
    let toggle = doc.append(nav, "button", &[("class", "c-nav__toggle")]);
    let list = doc.append(nav, "ul", &[("class", "c-nav__list")]);
    for href in ["/", "/diensten", "/contact"] {
        let item = doc.append(list, "li", &[]);
        doc.append(item, "a", &[("class", "c-nav__link"), ("href", href)]);
    }

    let config = EnhancerConfig::from_json(r#"{"navigation": {"breakpoint": 992}}"#)?;
    let time = VirtualTime::new();
    let enhancer = Enhancer::builder()
        .with_document(doc.clone())
        .with_scheduler(time.scheduler())
        .with_clock(Arc::new(time.clock().clone()))
        .with_config(config)
        .build()?;
    enhancer.activate();

    let Some(navigation) = enhancer.navigation() else {
        return Err("navigation markup missing".into());
    };

    doc.click(toggle);
    time.advance(Duration::from_millis(100));
    println!(
        "opened: aria-expanded={:?}, focus={:?}",
        doc.attribute(toggle, "aria-expanded"),
        doc.active_element()
    );

    doc.key_down(Key::Escape, Modifiers::none());
    println!("escape: state={:?}, focus back on toggle={}", navigation.state(), doc.active_element() == Some(toggle));

    doc.click(toggle);
    doc.resize(1200);
    time.advance(Duration::from_millis(150));
    println!("widened: state={:?}", navigation.state());

    println!("metrics: {:?}", enhancer.metrics().snapshot());
    Ok(())
}
