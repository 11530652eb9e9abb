//! Headless tour of the site against the in-memory page.
//!
//! Builds a small version of the home page, then clicks, scrolls and
//! submits through it while virtual time advances, logging what each
//! behavior does.

use std::{rc::Rc, time::Duration};

use anyhow::Context;
use saibaba_bridge::{Disposition, PageEvent};
use saibaba_interactions::{
    SiteContext,
    dom::Dom,
    memory::{ManualScheduler, MemoryDom, NodeId},
};

type Site = SiteContext<MemoryDom, ManualScheduler>;

const SITE_CONFIG: &str = r#"
[toast]
lifetime_ms = 3000
"#;

fn build_page(dom: &MemoryDom) {
    dom.add_to_body("script")
        .id("site-config")
        .attr("type", "application/toml")
        .text(SITE_CONFIG);

    let header = dom.add_to_body("header").class("header").node();
    let row = dom.add(header, "div").class("header-bottom-row").node();
    dom.add(row, "a").class("logo").attr("href", "#").text("Saibaba Group");
    let toggle = dom.add(row, "button").class("mobile-menu-toggle").node();
    for _ in 0..3 {
        dom.add(toggle, "span");
    }
    let menu = dom.add(row, "ul").class("nav-menu").node();
    for (href, label) in [("#home", "Home"), ("#team", "Our Team"), ("#contact", "Contact")] {
        dom.add(menu, "a").attr("href", href).text(label);
    }

    let home = dom.add_to_body("section").id("home").at(0.0).node();
    for index in 0..3 {
        let slide = dom.add(home, "div").class("hero-slide");
        if index == 0 {
            slide.class("active");
        }
    }
    dom.add(home, "a")
        .class("btn")
        .attr("href", "#catering")
        .text("Order Catering");

    let card = dom.add_to_body("div").class("location-card").at(900.0).node();
    dom.add(card, "h3").text("Edison");
    dom.add(card, "p")
        .class("location-address")
        .text("123 Main St, Edison, NJ");
    dom.add(card, "a").class("btn").attr("href", "#").text("Get Directions");

    let contact = dom.add_to_body("section").id("contact").at(1800.0).node();
    let form = dom.add(contact, "form").id("contactForm").node();
    for field in ["name", "email", "phone", "subject", "message"] {
        dom.add(form, "input").attr("name", field);
    }
}

fn click(site: &Site, dom: &MemoryDom, selector: &str) -> anyhow::Result<Disposition> {
    let target = dom
        .query(selector)
        .with_context(|| format!("preview page has no {selector}"))?;
    let disposition = site.dispatch(PageEvent::Click { target });
    log::info!("Clicked {selector}: {disposition:?}");
    Ok(disposition)
}

fn fill(dom: &MemoryDom, form: NodeId, field: &str, value: &str) -> anyhow::Result<()> {
    let input = dom
        .query_in(&form, &format!(r#"[name="{field}"]"#))
        .with_context(|| format!("contact form has no {field} field"))?;
    dom.set_value(input, value);
    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let dom = Rc::new(MemoryDom::new());
    build_page(&dom);
    let scheduler = Rc::new(ManualScheduler::new());
    let site = saibaba_interactions::start(dom.clone(), scheduler.clone());
    site.dispatch(PageEvent::Load);

    click(&site, &dom, ".mobile-menu-toggle")?;
    click(&site, &dom, r##".nav-menu a[href="#contact"]"##)?;
    log::info!("Scrolled to {:?}", dom.scroll_requests());

    click(&site, &dom, r##".nav-menu a[href="#team"]"##)?;
    click(&site, &dom, r##"a[href="#catering"]"##)?;
    click(&site, &dom, ".location-card .btn")?;
    log::info!("{} toast(s) on screen", site.presenter().live_count());

    for y in [40.0, 120.0, 1700.0] {
        dom.set_scroll_y(y);
        site.dispatch(PageEvent::Scroll);
    }
    scheduler.run_frame();
    log::info!(
        "Header shrunk: {}, current section: {:?}",
        site.header().is_some_and(|header| header.is_shrunk()),
        site.active_nav().current()
    );

    let form = dom
        .element_by_id("contactForm")
        .context("preview page has no contact form")?;
    fill(&dom, form, "name", "Priya")?;
    fill(&dom, form, "email", "priya@example.com")?;
    site.dispatch(PageEvent::Submit { form });

    scheduler.advance(Duration::from_millis(10_000));
    log::info!(
        "After 10s: slide {:?}, {} toast(s) on screen",
        site.hero().map(|hero| hero.current()),
        site.presenter().live_count()
    );
    Ok(())
}
