//! Phrase banks. `{fit}` and `{years}` are substituted by the generator.

use super::bands::{ExperienceBand, MatchQuality, OverlapLevel, Recommendation, SemanticFit};

pub(crate) fn opening(quality: MatchQuality) -> (&'static str, &'static [&'static str]) {
    let fit = match quality {
        MatchQuality::Excellent => "a strong match",
        MatchQuality::Good => "a good fit",
        MatchQuality::Moderate => "a reasonable match",
        MatchQuality::Limited => "a partial match",
        MatchQuality::Low => "a poor match",
    };

    const OPENINGS: &[&str] = &[
        "This candidate looks like {fit} for the role based on our analysis.",
        "Based on our evaluation, this candidate appears to be {fit} for the position.",
        "Our assessment suggests this candidate is {fit} for the role requirements.",
    ];

    (fit, OPENINGS)
}

pub(crate) fn experience(band: ExperienceBand) -> &'static [&'static str] {
    match band {
        ExperienceBand::Extensive => &[
            "With roughly {years} years of experience, the candidate brings substantial professional depth.",
            "The candidate offers extensive experience ({years} years), pointing to significant industry knowledge.",
            "Having {years} years in the field suggests strong domain expertise and seasoned judgment.",
        ],
        ExperienceBand::Solid => &[
            "The candidate has solid professional experience with around {years} years in relevant roles.",
            "With {years} years of experience, the candidate shows meaningful professional growth.",
            "This level of experience ({years} years) usually reflects well developed competencies.",
        ],
        ExperienceBand::Established => &[
            "The candidate has gained practical experience over {years} years, showing career progression.",
            "With {years} years of experience, the candidate has established foundational professional skills.",
            "This amount of experience suggests the candidate has moved beyond entry-level roles.",
        ],
        ExperienceBand::Early => &[
            "The candidate has limited but relevant experience of about {years} year(s), an early career stage.",
            "With {years} year(s) of experience, the candidate is still building core professional capabilities.",
            "This experience level places the candidate early in their professional development.",
        ],
        ExperienceBand::Minimal => &[
            "The resume indicates little professional experience, which matters for roles that require prior work.",
            "With minimal experience stated, the candidate would likely need more training and supervision.",
            "The resume shows little professional history, suggesting an entry-level candidate.",
        ],
    }
}

pub(crate) fn semantic(fit: SemanticFit) -> &'static [&'static str] {
    match fit {
        SemanticFit::Strong => &[
            "The language and content of the resume closely mirror the job description.",
            "The way the candidate presents their background lines up remarkably well with what the role asks for.",
            "The resume reads as clearly relevant to the position.",
        ],
        SemanticFit::Good => &[
            "The resume aligns well with the job requirements in overall content and focus.",
            "The candidate's background is broadly consistent with the role's expectations.",
            "Content analysis shows the candidate's experience is relevant to the position.",
        ],
        SemanticFit::Moderate => &[
            "The resume has some alignment with the job description without covering every key area.",
            "There is moderate relevance between the candidate's background and the position.",
            "The content overlaps partially with what the role typically demands.",
        ],
        SemanticFit::Weak => &[
            "The resume content does not closely follow the focus areas of the job description.",
            "There is limited alignment between the candidate's background and the specific role needs.",
            "The way experience is presented suggests this may not be an ideal match.",
        ],
    }
}

pub(crate) fn overlap(level: OverlapLevel) -> &'static [&'static str] {
    match level {
        OverlapLevel::High => &[
            "Most of the skills required for the role are covered by the candidate.",
            "The candidate matches the majority of the technical requirements for this position.",
            "The skills the role demands overlap strongly with what the candidate offers.",
        ],
        OverlapLevel::Good => &[
            "The candidate has many of the key skills this role needs.",
            "The required competencies are well covered by the skills mentioned.",
            "A substantial share of the necessary skills appears in the candidate's profile.",
        ],
        OverlapLevel::Partial => &[
            "Some important skills are present, though certain areas would need development.",
            "The candidate shows some relevant capabilities, but not every required skill is demonstrated.",
            "Skill alignment is partial, with room to grow in specific technical areas.",
        ],
        OverlapLevel::Low => &[
            "Few of the required skills are demonstrated by the candidate.",
            "The candidate would need to develop several key skills to meet the role requirements.",
            "There is a significant gap between the skills needed and those currently shown.",
        ],
    }
}

pub(crate) fn recommendation(recommendation: Recommendation) -> &'static [&'static str] {
    match recommendation {
        Recommendation::Strong => &[
            "Overall, this candidate is a strong contender worth taking to further review.",
            "In summary, the candidate shows good qualifications and merits serious consideration.",
            "Based on this analysis, the candidate shows promise and could be a valuable addition to the team.",
        ],
        Recommendation::Potential => &[
            "This candidate shows potential, but specific aspects of fit deserve a careful look.",
            "Overall, alignment is reasonable though certain areas need closer examination.",
            "The candidate has relevant qualifications that could grow with the right support.",
        ],
        Recommendation::Weak => &[
            "This profile may not align well with the current requirements.",
            "This candidate might be better suited to roles with a different focus.",
            "Other candidates may offer stronger alignment with the needs of this role.",
        ],
    }
}

pub(crate) const NO_SKILLS: &str = "The resume does not clearly highlight specific technical skills, which makes technical proficiency hard to assess against the role.";

pub(crate) const BROAD_SKILLS: &str =
    " This broad skill set suggests versatility across diverse responsibilities.";

pub(crate) const FEW_SKILLS: &str =
    " While these skills are relevant, the candidate may benefit from demonstrating additional competencies.";
