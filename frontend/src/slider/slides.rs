use std::collections::HashSet;

use crate::error::AppError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Visual {
    /// Browser mockup with a screenshot of a shipped site.
    Showcase {
        image: &'static str,
        url: &'static str,
    },
    /// Client emblem on a framed background.
    Emblem { image: &'static str },
    /// Reserved slot for a project that isn't live yet.
    Placeholder { label: &'static str },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideContent {
    pub eyebrow: &'static str,
    pub title_lines: &'static [&'static str],
    pub subtitle: &'static str,
    pub ctas: &'static [(&'static str, &'static str)],
    pub badges: &'static [&'static str],
    pub visual: Visual,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slide {
    pub id: &'static str,
    pub name: &'static str,
    pub theme: &'static str,
    pub content: SlideContent,
}

/// Ordered, fixed, non-empty list of showcase slides with unique ids.
#[derive(Clone, Debug, PartialEq)]
pub struct SlideSet {
    slides: Vec<Slide>,
}

impl SlideSet {
    pub fn new(slides: Vec<Slide>) -> Result<Self, AppError> {
        if slides.is_empty() {
            return Err(AppError::EmptySlideSet);
        }
        let mut seen = HashSet::new();
        for slide in &slides {
            if !seen.insert(slide.id) {
                return Err(AppError::DuplicateSlide(slide.id.to_string()));
            }
        }
        Ok(Self { slides })
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }

    /// Theme tag for a slide; falls back to the first slide's theme.
    pub fn theme(&self, index: usize) -> &'static str {
        self.get(index).unwrap_or(&self.slides[0]).theme
    }

    /// The hero showcase shipped on the home page.
    pub fn showcase() -> Result<Self, AppError> {
        Self::new(SHOWCASE.to_vec())
    }
}

const SHOWCASE: [Slide; 4] = [
    Slide {
        id: "acaistack",
        name: "AcaiStack",
        theme: "acaistack",
        content: SlideContent {
            eyebrow: "AI agents + beautiful websites",
            title_lines: &["Websites that", "work while", "you sleep"],
            subtitle: "We build fast, modern websites with intelligent AI agents that answer leads, book calls and keep your content fresh. You stay in control.",
            ctas: &[("Get Started", "/contact"), ("See our work", "#portfolio")],
            badges: &["GDPR compliant", "Made in Germany", "Launch in 14 days"],
            visual: Visual::Showcase {
                image: "/assets/showcase-acaistack.svg",
                url: "acaistack.dev",
            },
        },
    },
    Slide {
        id: "imkerei",
        name: "Imkerei Feuerstein",
        theme: "imkerei",
        content: SlideContent {
            eyebrow: "Client story",
            title_lines: &["Local honey,", "global reach"],
            subtitle: "A family beekeeping business with a new shop, seasonal product pages and an assistant that answers customer questions around the clock.",
            ctas: &[("Read the case study", "#portfolio"), ("Start your project", "/contact")],
            badges: &["+180% online orders", "4.9 ★ reviews"],
            visual: Visual::Emblem {
                image: "/assets/imkerei-emblem.svg",
            },
        },
    },
    Slide {
        id: "project3",
        name: "Your Project",
        theme: "project3",
        content: SlideContent {
            eyebrow: "This spot is reserved",
            title_lines: &["Your brand", "could be here"],
            subtitle: "Tell us about your business and we'll sketch a site and an agent workflow tailored to how you actually work.",
            ctas: &[("Book a free call", "/contact")],
            badges: &["No lock-in", "Fixed pricing"],
            visual: Visual::Placeholder {
                label: "Your project",
            },
        },
    },
    Slide {
        id: "project4",
        name: "Next Client",
        theme: "project4",
        content: SlideContent {
            eyebrow: "Coming soon",
            title_lines: &["Next launch", "in progress"],
            subtitle: "We're putting the finishing touches on another launch. Want yours to be next?",
            ctas: &[("Get on the list", "/contact")],
            badges: &["Limited slots per month"],
            visual: Visual::Placeholder {
                label: "Next client",
            },
        },
    },
];

#[cfg(test)]
pub(crate) fn named(ids: &[&'static str]) -> SlideSet {
    let template = SHOWCASE[0];
    SlideSet::new(
        ids.iter()
            .map(|&id| Slide {
                id,
                name: id,
                theme: id,
                ..template
            })
            .collect(),
    )
    .expect("test slide set")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn showcase_is_ordered_and_themed_by_id() {
        let set = SlideSet::showcase().expect("showcase slides are valid");
        let ids: Vec<_> = set.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["acaistack", "imkerei", "project3", "project4"]);
        assert!(set.iter().all(|s| s.theme == s.id));
    }

    #[test]
    fn showcase_images_ship_with_the_site() {
        let assets = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
        for slide in SHOWCASE {
            let image = match slide.content.visual {
                Visual::Showcase { image, .. } | Visual::Emblem { image } => image,
                Visual::Placeholder { .. } => continue,
            };
            let file = assets.join(image.trim_start_matches('/'));
            assert!(file.is_file(), "{} is missing {}", slide.id, file.display());
        }
    }

    #[test]
    fn rejects_empty_and_duplicate_sets() {
        assert_eq!(SlideSet::new(Vec::new()), Err(AppError::EmptySlideSet));
        let dup = vec![SHOWCASE[0], SHOWCASE[1], SHOWCASE[0]];
        assert_eq!(
            SlideSet::new(dup),
            Err(AppError::DuplicateSlide("acaistack".to_string()))
        );
    }

    #[test]
    fn theme_falls_back_to_first_slide() {
        let set = named(&["a", "b"]);
        assert_eq!(set.theme(1), "b");
        assert_eq!(set.theme(9), "a");
    }
}
