//! Prompt templates for the studio operations.
//!
//! Each template is a plain function from typed arguments to the prompt
//! string handed to the generator. The ad-copy and landing-page templates
//! accept scraped competitor ads and inline them as a numbered block.

use spyglass_core::AdCopy;

/// Ask for the fixed-shape audience profile as bare JSON.
pub fn audience_profile(topic: &str) -> String {
    format!(
        r#"You are a direct-response marketing strategist.

Analyze the market for an e-book about: {topic}

Identify the single most profitable buyer segment. Output ONLY valid JSON
with exactly this shape, no markdown, no commentary:

{{
  "pain_point": "the dominant problem this audience wants solved, one sentence",
  "promise": "the transformation the e-book should promise, one sentence",
  "audience": "who the buyer is, one concrete sentence"
}}"#
    )
}

/// Ask for a numbered chapter outline.
pub fn chapter_outline(topic: &str, audience: Option<&str>) -> String {
    format!(
        r#"You are a best-selling non-fiction ghostwriter.

Create a chapter outline for a short, practical e-book about: {topic}
{}
Requirements:
- 7 to 10 chapters
- Each line: the chapter number, a benefit-driven title, then a one-line summary
- Order the chapters so a beginner can follow them front to back

Output the numbered list only."#,
        audience_block(audience)
    )
}

/// Ask for one full chapter.
pub fn draft_chapter(topic: &str, audience: Option<&str>, chapter_title: &str) -> String {
    format!(
        r#"You are a best-selling non-fiction ghostwriter.

Write the chapter "{chapter_title}" for an e-book about: {topic}
{}
Requirements:
- 500 to 800 words of practical, specific advice
- Short paragraphs, plain language, no filler
- Open with a hook, close with one action step

Output the chapter body only, without repeating the title."#,
        audience_block(audience)
    )
}

/// Ask for an image-generation prompt for the cover.
pub fn cover_prompt(topic: &str, audience: Option<&str>) -> String {
    format!(
        r#"You are an art director for digital-product covers.

Write ONE image-generation prompt for the cover of an e-book about: {topic}
{}
The prompt must describe: the focal subject, the mood, a color palette,
the composition, and a style reference. Make it vivid and specific enough
to paste straight into an image model.

Output the prompt only."#,
        audience_block(audience)
    )
}

/// Ask for short-form ad copy, optionally seeded with competitor ads.
pub fn ad_copy(topic: &str, audience: Option<&str>, seeds: &[AdCopy]) -> String {
    format!(
        r#"You are a direct-response copywriter.

Write 3 short ads for an e-book about: {topic}
{}{}
Each ad needs: a scroll-stopping hook line, 2-3 lines of body copy, and a
call to action. Number the ads 1 to 3.

Output the ads only."#,
        audience_block(audience),
        competitor_block(seeds)
    )
}

/// Ask for a complete landing page as HTML.
pub fn landing_page(topic: &str, audience: Option<&str>, seeds: &[AdCopy]) -> String {
    format!(
        r#"You are a conversion-focused web copywriter and designer.

Write a complete single-file landing page (HTML with inline CSS) selling an
e-book about: {topic}
{}{}
The page needs: a benefit-driven headline, a subheadline, 3 bullet benefits,
one testimonial placeholder, a price block, and a call-to-action button.
Keep it self-contained: no external scripts, fonts, or images.

Output the HTML document only."#,
        audience_block(audience),
        competitor_block(seeds)
    )
}

/// Ask for post-purchase upsell copy.
pub fn upsell(topic: &str, audience: Option<&str>) -> String {
    format!(
        r#"You are a funnel copywriter.

The customer just bought an e-book about: {topic}
{}
Write the copy for a one-time upsell offer shown right after checkout: a
premium companion product (template pack, video course, or coaching call,
whichever fits best). Include a headline, 3 persuasion bullets, the offer
framing with a crossed-out price, and a yes/no choice.

Output the offer copy only."#,
        audience_block(audience)
    )
}

/// Ask for order-bump copy for the checkout page.
pub fn order_bump(topic: &str, audience: Option<&str>) -> String {
    format!(
        r#"You are a funnel copywriter.

A buyer is on the checkout page for an e-book about: {topic}
{}
Write the copy for a small order bump: a low-price add-on ticked with a
checkbox. One bolded headline, two sentences of benefit copy, and the
checkbox line itself.

Output the order-bump copy only."#,
        audience_block(audience)
    )
}

/// Render the optional audience line for a template.
fn audience_block(audience: Option<&str>) -> String {
    match audience {
        Some(audience) if !audience.trim().is_empty() => {
            format!("\nThe target audience: {}\n", audience.trim())
        }
        _ => String::new(),
    }
}

/// Render scraped competitor ads as a numbered block, empty when there are
/// no seeds.
fn competitor_block(seeds: &[AdCopy]) -> String {
    if seeds.is_empty() {
        return String::new();
    }

    let mut block = String::from("\nWinning competitor ads for reference (match what works, do not copy):\n");
    for (index, ad) in seeds.iter().enumerate() {
        match &ad.page_name {
            Some(page) => block.push_str(&format!("{}. [{}] {}\n", index + 1, page, ad.body)),
            None => block.push_str(&format!("{}. {}\n", index + 1, ad.body)),
        }
    }
    block
}
