use serde::{Deserialize, Serialize};
use std::fmt;

/// The listing sites coupons are collected from, in aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    UdemyFreebies,
    TutorialBar,
    RealDiscount,
    IDownloadCoupon,
    CourseVania,
    ENext,
}

impl Source {
    pub const ALL: [Source; 6] = [
        Source::UdemyFreebies,
        Source::TutorialBar,
        Source::RealDiscount,
        Source::IDownloadCoupon,
        Source::CourseVania,
        Source::ENext,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Source::UdemyFreebies => "udemyfreebies",
            Source::TutorialBar => "tutorialbar",
            Source::RealDiscount => "realdiscount",
            Source::IDownloadCoupon => "idownloadcoupon",
            Source::CourseVania => "coursevania",
            Source::ENext => "enext",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
