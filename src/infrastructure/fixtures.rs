//! Storefront page used by the page-level tests

use crate::application::ports::BoxMetrics;
use crate::domain::value_objects::ElementTemplate as El;
use crate::infrastructure::memory_document::MemoryDocument;

pub const HERO_SLIDES: usize = 5;
pub const CAMPAIGN_SLIDES: usize = 4;

/// Background of hero slide `i`
pub fn hero_background(i: usize) -> String {
    format!("./images/hero{}.jpg", i + 1)
}

/// The marketing page markup with the layout numbers the widgets read
pub fn storefront_page() -> MemoryDocument {
    let mut doc = MemoryDocument::new();

    doc.append_to_body(
        &El::new("header").child(
            El::new("nav")
                .child(El::new("button").attr("id", "mobile-menu-toggle"))
                .child(El::new("ul").class("nav-menu").children((0..3).map(|i| {
                    El::new("li").child(El::new("a").attr("href", format!("#s{}", i)).text("link"))
                }))),
        ),
    );

    doc.append_to_body(
        &El::new("div")
            .attr("id", "coupon-banner")
            .child(El::new("button").attr("id", "close-coupon")),
    );

    doc.append_to_body(
        &El::new("section")
            .class("hero")
            .children((0..HERO_SLIDES).map(|i| {
                let slide = El::new("div").class("slide");
                if i == 0 {
                    slide.class("active")
                } else {
                    slide
                }
            }))
            .child(El::new("div").class("tabs").children((0..HERO_SLIDES).map(|_| El::new("button").class("tab")))),
    );
    for (i, slide) in doc.find_all(".slide").into_iter().enumerate() {
        doc.set_sheet_style(slide, "background-image", &format!("url(\"{}\")", hero_background(i)));
    }

    doc.append_to_body(
        &El::new("div")
            .children([
                El::new("a").class("read-more-btn").attr("href", "#about"),
                El::new("a").class("read-more-btn").attr("href", "#"),
                El::new("a").class("read-more-btn").attr("href", "#missing"),
            ]),
    );

    doc.append_to_body(
        &El::new("section")
            .class("campaign")
            .child(
                El::new("div")
                    .class("campaign-carousel")
                    .children((0..CAMPAIGN_SLIDES).map(|i| El::new("div").class("campaign-slide").attr("data-i", i.to_string()))),
            )
            .child(
                El::new("div")
                    .class("campaign-nav")
                    .child(El::new("button").class("carousel-prev"))
                    .child(El::new("button").class("carousel-next")),
            )
            .child(El::new("div").children((0..CAMPAIGN_SLIDES).map(|_| El::new("div").class("campaign-thumb")))),
    );

    doc.append_to_body(&El::new("div").class("product-grid").child(El::new("p").text("placeholder")));

    doc.append_to_body(
        &El::new("section")
            .child(El::new("div").children([
                El::new("button").class("ranking-tab").class("active").attr("data-tab", "bestseller"),
                El::new("button").class("ranking-tab").attr("data-tab", "gift"),
                El::new("button").class("ranking-tab").attr("data-tab", "seasonal"),
            ]))
            .child(El::new("div").class("ranking-grid")),
    );

    let about = doc.append_to_body(
        &El::new("section")
            .class("about-section")
            .attr("id", "about")
            .child(El::new("div").class("about-images")),
    );
    doc.set_metrics(
        about,
        BoxMetrics {
            offset_top: 1000.0,
            offset_height: 2000.0,
            scroll_height: 2000.0,
        },
    );
    if let Some(images) = doc.find(".about-images") {
        doc.set_metrics(
            images,
            BoxMetrics {
                offset_top: 1000.0,
                offset_height: 800.0,
                scroll_height: 2400.0,
            },
        );
    }

    doc.append_to_body(
        &El::new("div")
            .class("newsletter-form")
            .child(El::new("form").child(El::new("input").attr("type", "email"))),
    );

    doc
}
