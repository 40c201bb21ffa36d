//! Fixed poster content: the uptake dataset, authors, panels and references.

use crate::config::PosterOptions;
use crate::types::{
    Block, ChartDataset, ChartPoint, GridArea, Inline, ListItem, Panel, PanelGroup, Poster,
    Reference,
};

/// Monthly plant-based meal uptake across the two PDSA cycles.
pub fn uptake_dataset() -> ChartDataset {
    ChartDataset::new(vec![
        ChartPoint::new("Baseline", 23.9),
        ChartPoint::new("PDSA 1", 21.4),
        ChartPoint::new("PDSA 2", 22.6),
    ])
}

const TITLE: &str = "Improving Plant-Based Meal Uptake in Hospital Inpatients: A Quality \
Improvement Project at King’s College Hospital";

const AUTHORS: [&str; 3] = [
    "Dr Clive Martin Rodrigues, IMT trainee, King’s College Hospital",
    "Dr Anandita Pattnaik, Policy Officer, Asthma & Lung UK",
    "Dr Shireen Kassam, Consultant Haematologist, King’s College Hospital",
];

fn text(s: &str) -> Inline {
    Inline::Text(s.to_string())
}

fn strong(s: &str) -> Inline {
    Inline::Strong(s.to_string())
}

fn em(s: &str) -> Inline {
    Inline::Emphasis(s.to_string())
}

fn para(inlines: Vec<Inline>) -> Block {
    Block::Paragraph {
        inlines,
        class: None,
    }
}

fn plain(s: &str) -> Block {
    para(vec![text(s)])
}

fn sub(s: &str) -> Block {
    Block::Subheading {
        text: s.to_string(),
    }
}

fn item(inlines: Vec<Inline>) -> ListItem {
    ListItem {
        inlines,
        class: None,
    }
}

fn bullets(items: Vec<ListItem>) -> Block {
    Block::List { items }
}

fn panel(class: &str, heading: &str, blocks: Vec<Block>) -> Panel {
    Panel {
        class: class.to_string(),
        heading: heading.to_string(),
        blocks,
    }
}

fn single(area: GridArea, panel: Panel) -> PanelGroup {
    PanelGroup {
        area,
        stacked: false,
        panels: vec![panel],
    }
}

fn stack(area: GridArea, panels: Vec<Panel>) -> PanelGroup {
    PanelGroup {
        area,
        stacked: true,
        panels,
    }
}

/// Build the poster. Image paths come from the options so hosts can relocate assets.
pub fn poster(options: &PosterOptions) -> Poster {
    Poster {
        title: TITLE.to_string(),
        authors: AUTHORS.iter().map(|a| (*a).to_string()).collect(),
        panels: vec![
            single(GridArea::Intro, introduction()),
            stack(
                GridArea::AimMethod,
                vec![aim(), methodology(), limitations()],
            ),
            stack(GridArea::ResultsDiscussion, vec![results(), discussion()]),
            single(
                GridArea::References,
                panel("", "References", vec![Block::References]),
            ),
            stack(
                GridArea::MenuRecommendations,
                vec![menu_snapshot(&options.menu_image), recommendations()],
            ),
        ],
        references: references(),
    }
}

fn introduction() -> Panel {
    panel(
        "",
        "Introduction",
        vec![para(vec![
            text(
                "Hospital food service is a key opportunity to promote both patient health and \
                 environmental sustainability. Diets rich in plant-based foods are associated with \
                 lower risks of chronic diseases and can significantly reduce dietary greenhouse \
                 gas emissions ",
            ),
            Inline::Cite(1),
            text(
                ". The EAT-Lancet “Planetary Health Diet” recommends doubling consumption of \
                 fruits, vegetables, legumes, and nuts, while reducing red meat and sugar by over \
                 50%, to improve health outcomes and environmental impact ",
            ),
            Inline::Cite(1),
            text(
                ". Aligning hospital menus with these guidelines could help achieve healthcare \
                 sustainability goals. The NHS has committed to a net-zero carbon footprint by 2045 ",
            ),
            Inline::Cite(2),
            text(
                ", yet a recent analysis of 36 UK hospital menus found limited progress toward \
                 plant-forward offerings—42% of hospitals surveyed had no fully plant-based main \
                 entrée option on the dinner menu ",
            ),
            Inline::Cite(3),
            text(
                ". There remains untapped potential for hospitals to reduce food-related carbon \
                 emissions by increasing plant-based meal options ",
            ),
            Inline::Cite(3),
            text("."),
        ])],
    )
}

fn aim() -> Panel {
    panel(
        "aim",
        "Aim, Objective & Standard",
        vec![
            sub("Aim"),
            plain(
                "Improve uptake of plant-based meals by inpatients to support patient choice, \
                 nutritional diversity, and a lower carbon footprint.",
            ),
            sub("Objective"),
            plain("Increase the percentage of plant-based main meals selected on target wards."),
            sub("Standard / Criteria"),
            Block::Paragraph {
                inlines: vec![
                    text("Align with EAT-Lancet Planetary Health Diet "),
                    Inline::Cite(1),
                    text(": "),
                    em(
                        "global consumption of fruits, vegetables, nuts, and legumes to double, \
                         and consumption of foods such as red meat and sugar to be reduced by \
                         more than 50%.",
                    ),
                ],
                class: Some("refnote".to_string()),
            },
        ],
    )
}

fn methodology() -> Panel {
    panel(
        "method",
        "Methodology",
        vec![
            plain(
                "QIP at two inpatient wards (Denmark Hill, London), March–May 2024. Baseline: \
                 patient menu choices (veg vs non-veg mains) in March. Two PDSA cycles followed:",
            ),
            sub("PDSA 1 — Menu Redesign"),
            bullets(vec![
                item(vec![text(
                    "Vegetarian options listed first (choice architecture; content unchanged).",
                )]),
                item(vec![text(
                    "No labels added/removed; staff brief on layout (no formal training).",
                )]),
            ]),
            sub("PDSA 2 — Information/Education Campaign"),
            bullets(vec![
                item(vec![text(
                    "Leaflet “Plant-Powered Plates” (health & environmental benefits) + gentle prompts.",
                )]),
                item(vec![text(
                    "Four-week distribution to raise awareness and support menu changes.",
                )]),
            ]),
        ],
    )
}

fn limitations() -> Panel {
    panel(
        "limitations",
        "Limitations",
        vec![bullets(vec![
            item(vec![text(
                "Short QIP duration; limited time for behaviour change to consolidate.",
            )]),
            item(vec![text(
                "Institutional change needs decision-maker support and frontline engagement; \
                 staff may need training and consistent messaging.",
            )]),
            item(vec![text(
                "Possible differences in meal availability/quality not assessed; negative \
                 experiences may deter selection.",
            )]),
        ])],
    )
}

fn results() -> Panel {
    panel(
        "results",
        "Key Results",
        vec![
            Block::Figure,
            bullets(vec![
                item(vec![
                    strong("Baseline:"),
                    text(" 23.9% plant-based (516/2163)."),
                ]),
                item(vec![
                    strong("PDSA 1:"),
                    text(" 21.4% (466/2179) — drop of ~2.5 pp; menu change alone insufficient."),
                ]),
                item(vec![
                    strong("PDSA 2:"),
                    text(" 22.6% (589/2612) — very minimal rise vs Apr; still ~baseline."),
                ]),
                item(vec![
                    strong("Overall:"),
                    text(" No significant net gain by end of Cycle 2 (~22.6% vs 23.9% baseline)."),
                ]),
                ListItem {
                    inlines: vec![
                        strong("Important:"),
                        text(
                            " Differences are very minimal and could plausibly be due to chance \
                             and/or month-to-month differences in patient case mix (short duration).",
                        ),
                    ],
                    class: Some("muted".to_string()),
                },
            ]),
        ],
    )
}

fn discussion() -> Panel {
    panel(
        "discussion",
        "Discussion",
        vec![bullets(vec![
            item(vec![
                text("Menu re-ordering + short IEC had "),
                em("very minimal"),
                text(" impact in isolation; likely within normal variation."),
            ]),
            item(vec![text(
                "Patient turnover and case mix varied — part of the difference may reflect \
                 chance rather than true effects.",
            )]),
            item(vec![text(
                "For nudges to work, patients must actually see and consider the menu; \
                 visibility and point-of-order workflow are critical.",
            )]),
            item(vec![text(
                "Education raised awareness but did not reliably change choices without human \
                 facilitation at ordering.",
            )]),
            item(vec![
                strong("Main learning:"),
                text(" Passive interventions alone are unlikely to produce meaningful change."),
            ]),
        ])],
    )
}

fn menu_snapshot(menu_image: &str) -> Panel {
    panel(
        "menuPanel",
        "Menu Snapshot",
        vec![
            Block::Image {
                src: menu_image.to_string(),
                alt: "Sample menu used during the project".to_string(),
                class: "menuImg".to_string(),
            },
            Block::Paragraph {
                inlines: vec![text(
                    "Extract from the redesigned menu highlighting plant-forward meal placement \
                     used in PDSA Cycle 1.",
                )],
                class: Some("muted".to_string()),
            },
        ],
    )
}

fn recommendations() -> Panel {
    panel(
        "recommendations",
        "Recommendations / Next Steps",
        vec![bullets(vec![
            item(vec![
                strong("Train ordering staff"),
                text(" to offer plant-based with positive framing; script & coach prompts."),
            ]),
            item(vec![
                text("Add "),
                strong("low-carbon icons"),
                text(
                    " / clear labels; improve taste/appeal of veg dishes; consider small \
                     “default-veg” pilots.",
                ),
            ]),
            item(vec![text(
                "Run longer PDSA cycles; monitor fidelity (menu visibility, staff prompts) and case mix.",
            )]),
        ])],
    )
}

fn references() -> Vec<Reference> {
    vec![
        Reference {
            source: "EAT-Lancet Commission.".to_string(),
            title: "Summary Report".to_string(),
            suffix: Some(".".to_string()),
            url: "https://eatforum.org/eat-lancet/summary-report/".to_string(),
        },
        Reference {
            source: "NHS England.".to_string(),
            title: "Delivering a ‘Net Zero’ National Health Service".to_string(),
            suffix: Some(" (Greener NHS).".to_string()),
            url: "https://www.england.nhs.uk/greenernhs/".to_string(),
        },
        Reference {
            source: "Holmes M, Wellstead A, et al.".to_string(),
            title: "How Sustainable Are Hospital Menus in the United Kingdom?".to_string(),
            suffix: Some(" J Hum Nutr Diet. 2025.".to_string()),
            url: "https://onlinelibrary.wiley.com/doi/10.1111/jhn.70019".to_string(),
        },
    ]
}
