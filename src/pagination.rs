//! Common functionality for paging through the transactions table.

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The maximum transactions to display per page when not specified in a request.
    pub default_page_size: u64,
    /// The maximum number of numbered page links to show at once.
    pub max_page_links: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 20,
            max_page_links: 5,
        }
    }
}

/// One element of the pagination control strip.
#[derive(Debug, PartialEq, Eq)]
pub enum PageControl {
    /// A link to the previous page.
    Back(u64),
    /// A numbered page link. `is_current` marks the page being viewed.
    Number {
        page: u64,
        is_current: bool,
    },
    /// A gap between non-adjacent page numbers.
    Gap,
    /// A link to the next page.
    Next(u64),
}

/// Build the control strip for `current_page` out of `page_count` pages.
///
/// At most `max_page_links` numbered links are shown, centred on the current
/// page where possible, with the first and last page always reachable through
/// a gapped link. Back/next controls appear only when there is a page in that
/// direction.
pub fn page_controls(current_page: u64, page_count: u64, max_page_links: u64) -> Vec<PageControl> {
    let number = |page| PageControl::Number {
        page,
        is_current: page == current_page,
    };

    let half_window = max_page_links / 2;

    let (window_start, window_end) = if page_count <= max_page_links {
        (1, page_count)
    } else if current_page <= half_window {
        (1, max_page_links)
    } else if current_page > page_count - half_window {
        (page_count - max_page_links + 1, page_count)
    } else {
        (current_page - half_window, current_page + half_window)
    };

    let mut controls = Vec::new();

    if current_page > 1 {
        controls.push(PageControl::Back(current_page - 1));
    }

    if window_start > 1 {
        controls.push(number(1));
        controls.push(PageControl::Gap);
    }

    controls.extend((window_start..=window_end).map(number));

    if window_end < page_count {
        controls.push(PageControl::Gap);
        controls.push(number(page_count));
    }

    if current_page < page_count {
        controls.push(PageControl::Next(current_page + 1));
    }

    controls
}

#[cfg(test)]
mod tests {
    use crate::pagination::{PageControl, page_controls};

    fn page(page: u64) -> PageControl {
        PageControl::Number {
            page,
            is_current: false,
        }
    }

    fn current(page: u64) -> PageControl {
        PageControl::Number {
            page,
            is_current: true,
        }
    }

    #[test]
    fn shows_every_page_when_they_fit() {
        let got = page_controls(1, 5, 5);

        let want = [
            current(1),
            page(2),
            page(3),
            page(4),
            page(5),
            PageControl::Next(2),
        ];

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn single_page_has_no_controls_but_itself() {
        let got = page_controls(1, 1, 5);

        assert_eq!([current(1)], got.as_slice());
    }

    #[test]
    fn window_pins_to_the_left_near_the_start() {
        let got = page_controls(2, 10, 5);

        let want = [
            PageControl::Back(1),
            page(1),
            current(2),
            page(3),
            page(4),
            page(5),
            PageControl::Gap,
            page(10),
            PageControl::Next(3),
        ];

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn window_pins_to_the_right_near_the_end() {
        let got = page_controls(10, 10, 5);

        let want = [
            PageControl::Back(9),
            page(1),
            PageControl::Gap,
            page(6),
            page(7),
            page(8),
            page(9),
            current(10),
        ];

        assert_eq!(want, got.as_slice());
    }

    #[test]
    fn window_centres_on_the_current_page_in_the_middle() {
        let got = page_controls(5, 10, 5);

        let want = [
            PageControl::Back(4),
            page(1),
            PageControl::Gap,
            page(3),
            page(4),
            current(5),
            page(6),
            page(7),
            PageControl::Gap,
            page(10),
            PageControl::Next(6),
        ];

        assert_eq!(want, got.as_slice());
    }
}
