//! Page-break estimation.
//!
//! Sections are placed strictly in document order. The only state carried
//! between sections is the space remaining on the current page. Each section
//! is measured once, compared against that counter and the split threshold,
//! and then placed whole, moved to a fresh page, or split in two.

use serde::Serialize;

use crate::layout::measure::HeightMeasurer;
use crate::layout::page::PageGeometry;
use crate::render::document::{Document, SectionBlock, Theme};
use crate::render::templates::TemplateId;
use crate::resume::SectionId;

// ────────────────────────────────────────────────────────────────────────────
// Break decision
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakDecision {
    /// Placed on the current page.
    Fits,
    /// Starts on a new page.
    ForceBreak,
    /// Partitioned; everything after the first fragment starts on a new page.
    Split,
}

/// Decides how one section is placed given its measured height and the space
/// left on the current page.
///
/// Unmeasured, non-finite and non-positive heights always fit. A height over
/// the split threshold splits regardless of the remaining space.
pub fn decide_break(height: Option<f32>, remaining: f32, page: &PageGeometry) -> BreakDecision {
    let Some(height) = usable(height) else {
        return BreakDecision::Fits;
    };
    if height > page.split_height() {
        BreakDecision::Split
    } else if height <= remaining {
        BreakDecision::Fits
    } else {
        BreakDecision::ForceBreak
    }
}

fn usable(height: Option<f32>) -> Option<f32> {
    height.filter(|h| h.is_finite() && *h > 0.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Paged output
// ────────────────────────────────────────────────────────────────────────────

/// Which part of a section a placement holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Fragment {
    Whole,
    Head,
    /// A continuation. A section taller than two pages has several.
    Tail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub section: SectionBlock,
    pub decision: BreakDecision,
    pub fragment: Fragment,
    /// Measured height of this fragment; `None` when unmeasured.
    pub height: Option<f32>,
    /// The first fragment of a split, allowed to break across pages in print.
    pub splittable: bool,
    /// Opens a page that the estimator started.
    pub page_break_before: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// 1-based.
    pub number: usize,
    pub placements: Vec<Placement>,
}

impl Page {
    fn new(number: usize) -> Self {
        Page {
            number,
            placements: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedDocument {
    pub template: TemplateId,
    pub theme: Theme,
    pub pages: Vec<Page>,
}

/// Compact pagination summary served by the pages endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationReport {
    pub template: TemplateId,
    pub page_count: usize,
    pub pages: Vec<PageReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageReport {
    pub number: usize,
    pub sections: Vec<PlacementReport>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementReport {
    pub id: SectionId,
    pub decision: BreakDecision,
    pub fragment: Fragment,
    pub height: Option<f32>,
    pub items: usize,
}

impl PagedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn report(&self) -> PaginationReport {
        PaginationReport {
            template: self.template,
            page_count: self.page_count(),
            pages: self
                .pages
                .iter()
                .map(|page| PageReport {
                    number: page.number,
                    sections: page
                        .placements
                        .iter()
                        .map(|p| PlacementReport {
                            id: p.section.id.clone(),
                            decision: p.decision,
                            fragment: p.fragment,
                            height: p.height,
                            items: p.section.items.len(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Paginator
// ────────────────────────────────────────────────────────────────────────────

pub struct Paginator<'a> {
    measurer: &'a dyn HeightMeasurer,
    page: PageGeometry,
}

impl<'a> Paginator<'a> {
    pub fn new(measurer: &'a dyn HeightMeasurer, page: PageGeometry) -> Self {
        Paginator { measurer, page }
    }

    /// Assigns every section of `doc` to a page. Always yields at least one page.
    ///
    /// Pages hold at most the content box of the page. Only a single item
    /// taller than the content box can overfill one, and it then sits alone.
    pub fn paginate(&self, doc: Document) -> PagedDocument {
        let Document {
            template,
            theme,
            sections,
        } = doc;
        let capacity = self.page.content_height_px();

        let mut pages = vec![Page::new(1)];
        let mut remaining = capacity;

        for section in sections {
            let height = self.measurer.measure(&section, &theme);
            let h = usable(height).unwrap_or(0.0);

            let decision = match decide_break(height, remaining, &self.page) {
                BreakDecision::Split if section.items.len() < 2 => {
                    if h <= remaining {
                        BreakDecision::Fits
                    } else {
                        BreakDecision::ForceBreak
                    }
                }
                decision => decision,
            };

            match decision {
                BreakDecision::Fits => {
                    remaining = (remaining - h).max(0.0);
                    push(&mut pages, Placement::whole(section, decision, height, false));
                }
                BreakDecision::ForceBreak => {
                    let opened = open_page_if_used(&mut pages);
                    remaining = (capacity - h).max(0.0);
                    push(&mut pages, Placement::whole(section, decision, height, opened));
                }
                BreakDecision::Split => {
                    remaining = self.place_split(&mut pages, section, &theme, remaining);
                }
            }
        }

        PagedDocument {
            template,
            theme,
            pages,
        }
    }

    /// Places a split section and returns the space left on the last page.
    ///
    /// The head is cut at the midpoint, or earlier when the midpoint head does
    /// not fit the current page. If not even one item fits, the section moves
    /// to a fresh page first. The rest continues on new pages, cut again
    /// wherever it still exceeds a page.
    fn place_split(
        &self,
        pages: &mut Vec<Page>,
        section: SectionBlock,
        theme: &Theme,
        remaining: f32,
    ) -> f32 {
        let capacity = self.page.content_height_px();
        let midpoint = section.items.len() / 2;

        let (cut, page_break_before, room) =
            match self.fitting_prefix(&section, theme, midpoint, remaining) {
                Some(cut) => (cut, false, remaining),
                None => {
                    let opened = open_page_if_used(pages);
                    let cut = self
                        .fitting_prefix(&section, theme, midpoint, capacity)
                        .unwrap_or(1);
                    (cut, opened, capacity)
                }
            };

        let (head, mut rest) = section.split_at(cut);
        let head_height = self.measurer.measure(&head, theme);
        push(
            pages,
            Placement {
                section: head,
                decision: BreakDecision::Split,
                fragment: Fragment::Head,
                height: head_height,
                splittable: true,
                page_break_before,
            },
        );
        let mut remaining = (room - usable(head_height).unwrap_or(0.0)).max(0.0);

        while !rest.items.is_empty() {
            pages.push(Page::new(pages.len() + 1));
            let rest_height = usable(self.measurer.measure(&rest, theme)).unwrap_or(0.0);
            let cut = if rest_height <= capacity || rest.items.len() < 2 {
                rest.items.len()
            } else {
                self.fitting_prefix(&rest, theme, rest.items.len() - 1, capacity)
                    .unwrap_or(1)
            };
            let (fragment, next) = rest.split_at(cut);
            let height = self.measurer.measure(&fragment, theme);
            remaining = (capacity - usable(height).unwrap_or(0.0)).max(0.0);
            push(
                pages,
                Placement {
                    section: fragment,
                    decision: BreakDecision::Split,
                    fragment: Fragment::Tail,
                    height,
                    splittable: false,
                    page_break_before: true,
                },
            );
            rest = next;
        }
        remaining
    }

    /// Largest cut in `1..=upto` whose head fits `room`.
    fn fitting_prefix(
        &self,
        block: &SectionBlock,
        theme: &Theme,
        upto: usize,
        room: f32,
    ) -> Option<usize> {
        (1..=upto).rev().find(|&cut| {
            let (head, _) = block.split_at(cut);
            usable(self.measurer.measure(&head, theme)).unwrap_or(0.0) <= room
        })
    }
}

impl Placement {
    fn whole(
        section: SectionBlock,
        decision: BreakDecision,
        height: Option<f32>,
        page_break_before: bool,
    ) -> Self {
        Placement {
            section,
            decision,
            fragment: Fragment::Whole,
            height,
            splittable: false,
            page_break_before,
        }
    }
}

fn push(pages: &mut Vec<Page>, placement: Placement) {
    if let Some(page) = pages.last_mut() {
        page.placements.push(placement);
    }
}

/// Starts a new page unless the current one is still empty. Returns whether
/// a page was opened.
fn open_page_if_used(pages: &mut Vec<Page>) -> bool {
    let used = pages.last().is_some_and(|p| !p.placements.is_empty());
    if used {
        pages.push(Page::new(pages.len() + 1));
    }
    used
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::measure::{MetricMeasurer, NoLayoutEngine};
    use crate::render::document::{Item, ItemKind, SectionLayout};
    use crate::render::templates::{fixtures::full_content, renderer_for};

    /// Every item is `px` tall; headings and gaps are free.
    struct PerItem(f32);

    impl HeightMeasurer for PerItem {
        fn measure(&self, block: &SectionBlock, _theme: &Theme) -> Option<f32> {
            Some(block.items.len() as f32 * self.0)
        }
    }

    fn section(key: &str, items: usize) -> SectionBlock {
        SectionBlock::new(
            SectionId::parse(key),
            Some(key.to_string()),
            SectionLayout::Stacked,
        )
        .with_items(
            (0..items)
                .map(|i| Item::new(ItemKind::Custom, format!("{key} {i}")))
                .collect(),
        )
    }

    fn doc(sections: Vec<SectionBlock>) -> Document {
        Document {
            template: TemplateId::Classic,
            theme: renderer_for(TemplateId::Classic).theme(),
            sections,
        }
    }

    fn page_of(paged: &PagedDocument, key: &str) -> Vec<usize> {
        let id = SectionId::parse(key);
        paged
            .pages
            .iter()
            .filter(|p| p.placements.iter().any(|pl| pl.section.id == id))
            .map(|p| p.number)
            .collect()
    }

    #[test]
    fn test_decision_table() {
        let page = PageGeometry::a4();
        assert_eq!(decide_break(Some(500.0), 700.0, &page), BreakDecision::Fits);
        assert_eq!(decide_break(Some(950.0), 1123.0, &page), BreakDecision::Split);
        assert_eq!(decide_break(Some(400.0), 200.0, &page), BreakDecision::ForceBreak);
        assert_eq!(decide_break(Some(0.0), 10.0, &page), BreakDecision::Fits);
        assert_eq!(decide_break(None, 0.0, &page), BreakDecision::Fits);
        assert_eq!(decide_break(Some(f32::NAN), 0.0, &page), BreakDecision::Fits);
    }

    #[test]
    fn test_threshold_boundary_is_exclusive() {
        let page = PageGeometry::a4();
        let threshold = page.split_height();
        assert_eq!(decide_break(Some(threshold), 1123.0, &page), BreakDecision::Fits);
        assert_eq!(decide_break(Some(threshold + 1.0), 1123.0, &page), BreakDecision::Split);
    }

    #[test]
    fn test_remaining_space_is_cumulative() {
        let measurer = PerItem(100.0);
        let paginator = Paginator::new(&measurer, PageGeometry::a4());
        // 300 each: 1084.6 -> 784.6 -> 484.6 -> 184.6, then 300 no longer fits.
        let paged = paginator.paginate(doc(vec![
            section("experience", 3),
            section("education", 3),
            section("skills", 3),
            section("projects", 3),
        ]));
        assert_eq!(paged.page_count(), 2);
        assert_eq!(page_of(&paged, "skills"), vec![1]);
        assert_eq!(page_of(&paged, "projects"), vec![2]);
        let moved = &paged.pages[1].placements[0];
        assert_eq!(moved.decision, BreakDecision::ForceBreak);
        assert!(moved.page_break_before);
    }

    #[test]
    fn test_tall_section_splits_at_midpoint() {
        let measurer = PerItem(100.0);
        let paginator = Paginator::new(&measurer, PageGeometry::a4());
        let paged = paginator.paginate(doc(vec![section("experience", 11)]));

        assert_eq!(paged.page_count(), 2);
        let head = &paged.pages[0].placements[0];
        let tail = &paged.pages[1].placements[0];
        assert_eq!(head.fragment, Fragment::Head);
        assert_eq!(head.section.items.len(), 5);
        assert!(head.splittable);
        assert_eq!(tail.fragment, Fragment::Tail);
        assert_eq!(tail.section.items.len(), 6);
        assert!(tail.page_break_before);
        assert!(tail.section.continued);
        assert_eq!(tail.section.items[0].title, "experience 5");
    }

    #[test]
    fn test_remaining_continues_after_tail() {
        let measurer = PerItem(100.0);
        let paginator = Paginator::new(&measurer, PageGeometry::a4());
        // Tail is 500 tall, leaving 584.6: a 500 section fits beside it, a further 100 does not.
        let paged = paginator.paginate(doc(vec![
            section("experience", 10),
            section("projects", 5),
            section("skills", 1),
        ]));
        assert_eq!(page_of(&paged, "projects"), vec![2]);
        assert_eq!(page_of(&paged, "skills"), vec![3]);
    }

    #[test]
    fn test_single_item_cannot_split() {
        let measurer = PerItem(1200.0);
        let paginator = Paginator::new(&measurer, PageGeometry::a4());
        let paged = paginator.paginate(doc(vec![section("summary", 1), section("skills", 1)]));
        // Oversized on an empty page stays there and exhausts it.
        assert_eq!(paged.pages[0].placements[0].decision, BreakDecision::ForceBreak);
        assert!(!paged.pages[0].placements[0].page_break_before);
        assert_eq!(paged.page_count(), 2);
        assert_eq!(paged.pages[1].placements[0].fragment, Fragment::Whole);
    }

    #[test]
    fn test_unmeasured_sections_all_fit_on_one_page() {
        let paginator = Paginator::new(&NoLayoutEngine, PageGeometry::a4());
        let paged = paginator.paginate(doc(vec![section("experience", 40), section("skills", 40)]));
        assert_eq!(paged.page_count(), 1);
        assert!(paged.pages[0]
            .placements
            .iter()
            .all(|p| p.decision == BreakDecision::Fits && p.height.is_none()));
    }

    #[test]
    fn test_empty_document_has_one_empty_page() {
        let paged = Paginator::new(&PerItem(1.0), PageGeometry::a4()).paginate(doc(vec![]));
        assert_eq!(paged.page_count(), 1);
        assert!(paged.pages[0].placements.is_empty());
    }

    #[test]
    fn test_pagination_is_deterministic_and_keeps_order() {
        let measurer = MetricMeasurer::default();
        let paginator = Paginator::new(&measurer, PageGeometry::a4());
        let content = full_content();
        for id in TemplateId::ALL {
            let render = || paginator.paginate(renderer_for(id).render(&content));
            let a = render();
            assert_eq!(a, render(), "{id:?}");
            let order: Vec<_> = a
                .pages
                .iter()
                .flat_map(|p| &p.placements)
                .map(|p| p.section.id.as_str().to_string())
                .collect();
            assert_eq!(
                order,
                vec!["personal-info", "experience", "education", "skills", "projects"],
                "{id:?}"
            );
        }
    }

    #[test]
    fn test_report_mirrors_pages() {
        let measurer = PerItem(100.0);
        let paged = Paginator::new(&measurer, PageGeometry::a4())
            .paginate(doc(vec![section("experience", 10)]));
        let report = paged.report();
        assert_eq!(report.page_count, 2);
        assert_eq!(report.pages[1].sections[0].fragment, Fragment::Tail);
        assert_eq!(report.pages[1].sections[0].items, 5);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["pageCount"], 2);
        assert_eq!(json["pages"][0]["sections"][0]["decision"], "split");
    }

    fn assert_within_capacity(paged: &PagedDocument, capacity: f32) {
        for page in &paged.pages {
            let used: f32 = page.placements.iter().filter_map(|p| p.height).sum();
            let lone_item = page.placements.len() == 1 && page.placements[0].section.items.len() == 1;
            assert!(
                used <= capacity + 1e-3 || lone_item,
                "page {} holds {used}px of {capacity}px",
                page.number
            );
        }
    }

    #[test]
    fn test_split_on_partly_filled_page_cuts_to_fit() {
        let measurer = PerItem(100.0);
        let paginator = Paginator::new(&measurer, PageGeometry::a4());
        // 800 leaves 284.6: the midpoint head (500) does not fit, two rows do.
        let paged = paginator.paginate(doc(vec![section("experience", 8), section("projects", 10)]));

        assert_eq!(paged.page_count(), 2);
        let head = &paged.pages[0].placements[1];
        assert_eq!(head.fragment, Fragment::Head);
        assert_eq!(head.section.items.len(), 2);
        assert!(!head.page_break_before);
        let tail = &paged.pages[1].placements[0];
        assert_eq!(tail.section.items.len(), 8);
        assert_eq!(tail.section.items[0].title, "projects 2");
        assert_within_capacity(&paged, PageGeometry::a4().content_height_px());
    }

    #[test]
    fn test_split_moves_to_fresh_page_when_no_row_fits() {
        let measurer = PerItem(100.0);
        let paginator = Paginator::new(&measurer, PageGeometry::a4());
        // 800 + 200 leaves 84.6, less than one row.
        let paged = paginator.paginate(doc(vec![
            section("summary", 8),
            section("education", 2),
            section("experience", 10),
        ]));

        assert_eq!(page_of(&paged, "experience"), vec![2, 3]);
        let head = &paged.pages[1].placements[0];
        assert_eq!(head.fragment, Fragment::Head);
        assert_eq!(head.section.items.len(), 5);
        assert!(head.page_break_before);
        assert!(head.section.heading.is_some());
    }

    #[test]
    fn test_very_tall_section_continues_over_several_pages() {
        let measurer = PerItem(100.0);
        let paginator = Paginator::new(&measurer, PageGeometry::a4());
        let paged = paginator.paginate(doc(vec![section("experience", 30)]));

        assert_eq!(paged.page_count(), 3);
        let counts: Vec<usize> = paged
            .pages
            .iter()
            .map(|p| p.placements[0].section.items.len())
            .collect();
        assert_eq!(counts, vec![10, 10, 10]);
        assert!(paged.pages[1..]
            .iter()
            .all(|p| p.placements[0].fragment == Fragment::Tail
                && p.placements[0].page_break_before
                && p.placements[0].section.continued));
    }

    #[test]
    fn test_no_page_is_overfilled() {
        let capacity = PageGeometry::a4().content_height_px();
        let layouts: [&[usize]; 5] = [&[8, 10], &[3, 14, 2, 30], &[1, 1, 40, 5], &[20], &[2, 2, 2, 9]];
        for px in [35.0, 90.0, 140.0, 260.0, 700.0, 1200.0] {
            let measurer = PerItem(px);
            let paginator = Paginator::new(&measurer, PageGeometry::a4());
            for counts in layouts {
                let keys = ["summary", "experience", "education", "skills", "projects"];
                let sections = counts
                    .iter()
                    .zip(keys)
                    .map(|(&n, key)| section(key, n))
                    .collect();
                let paged = paginator.paginate(doc(sections));
                assert_within_capacity(&paged, capacity);
                let placed: usize = paged
                    .pages
                    .iter()
                    .flat_map(|p| &p.placements)
                    .map(|p| p.section.items.len())
                    .sum();
                assert_eq!(placed, counts.iter().sum::<usize>(), "{px}px {counts:?}");
            }
        }
    }

    #[test]
    fn test_template_output_stays_within_pages() {
        let measurer = MetricMeasurer::default();
        let paginator = Paginator::new(&measurer, PageGeometry::a4());
        let mut content = full_content();
        let entry = content.experience[0].clone();
        content.experience = (0..12).map(|_| entry.clone()).collect();
        for id in TemplateId::ALL {
            let paged = paginator.paginate(renderer_for(id).render(&content));
            assert_within_capacity(&paged, PageGeometry::a4().content_height_px());
        }
    }
}
