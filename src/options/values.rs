use super::OptionValue;

/// Declares an option enum together with its string domain. The first listed
/// value is the enum's `Default`; registry defaults are set per key.
macro_rules! option_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $first:ident => $first_text:literal,
            $($variant:ident => $text:literal),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub enum $name {
            #[default]
            $first,
            $($variant),*
        }

        impl $name {
            pub const fn as_str(self) -> &'static str {
                match self {
                    Self::$first => $first_text,
                    $(Self::$variant => $text),*
                }
            }
        }

        impl OptionValue for $name {
            const DOMAIN: &'static [&'static str] = &[$first_text, $($text),*];

            fn parse(value: &str) -> Option<Self> {
                match value {
                    $first_text => Some(Self::$first),
                    $($text => Some(Self::$variant),)*
                    _ => None,
                }
            }

            fn as_str(self) -> &'static str {
                $name::as_str(self)
            }
        }
    };
}

option_enum! {
    pub enum YesNo {
        Yes => "yes",
        No => "no",
    }
}

option_enum! {
    /// Where the accessed date sits relative to the record link.
    pub enum AccessedDate {
        ParenAfterLink => "parenAfterLink",
        ParenBeforeLink => "parenBeforeLink",
        Omit => "none",
    }
}

option_enum! {
    /// How supplemental record data is included in a citation.
    pub enum DataStyle {
        Text => "string",
        Omit => "none",
        List => "list",
        Table => "table",
    }
}

option_enum! {
    pub enum NameOrPronoun {
        FirstName => "firstName",
        FullName => "fullName",
    }
}

option_enum! {
    pub enum OccupationFormat {
        AsIs => "asIs",
        LowerCase => "lowerCase",
        TitleCase => "titleCase",
    }
}

option_enum! {
    /// "12 March 1858" or "12 Mar 1858".
    pub enum DateFormat {
        Long => "long",
        Short => "short",
    }
}

option_enum! {
    pub enum SentenceStart {
        InTheCensus => "inTheCensus",
        InYear => "inYear",
    }
}

option_enum! {
    pub enum WasPartFormat {
        WasLiving => "wasLiving",
        WasEnumerated => "wasEnumerated",
    }
}

option_enum! {
    /// "Charles (14)", "Charles, age 14,", "Charles age 14", "Charles aged 14".
    pub enum AgeFormat {
        ParensAge => "parensAge",
        CommasAge => "commasAge",
        PlainAge => "plainAge",
        PlainAged => "plainAged",
    }
}

option_enum! {
    pub enum IncludePart {
        InMainSentence => "inMainSentence",
        InSeparateSentence => "inSeparateSentence",
        No => "no",
    }
}

option_enum! {
    /// `InSeparateSentenceHead` only states the occupation when the person heads
    /// the household.
    pub enum OccupationPart {
        InMainSentence => "inMainSentence",
        InSeparateSentence => "inSeparateSentence",
        InSeparateSentenceHead => "inSeparateSentenceHead",
        No => "no",
    }
}

option_enum! {
    pub enum HouseholdPartFormat {
        Relationship => "relationship",
        WithFamily => "withFamily",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_domain() {
        for value in OccupationPart::DOMAIN {
            let parsed = OccupationPart::parse(value).unwrap();
            assert_eq!(parsed.as_str(), *value);
        }
    }

    #[test]
    fn first_variant_is_default() {
        assert_eq!(DataStyle::default(), DataStyle::Text);
        assert_eq!(AgeFormat::default(), AgeFormat::ParensAge);
    }

    #[test]
    fn values_are_case_sensitive() {
        assert_eq!(IncludePart::parse("InMainSentence"), None);
        assert_eq!(IncludePart::parse("maybe"), None);
    }
}
