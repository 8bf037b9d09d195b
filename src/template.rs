//! The fixed layout of the declaration document.

use crate::input::DeclarationInput;
use decl_layout::DocumentBlock;
use decl_style::catalog::StyleName;
use decl_style::dimension::cm;

const HEADING: &str = "<b>Oświadczenie o osiągnięciu naukowym</b>";

const DECLARATION_1: &str = "1. Niniejszym oświadczam, że niżej wymienione osiągnięcie/a naukowe \
powstały w związku z zatrudnieniem w Akademii Górniczo-Hutniczej im. Stanisława Staszica w Krakowie \
lub odbywaniem kształcenia w podmiocie i przypisuję do następujących dyscyplin:";

const DECLARATION_2: &str = "2. Jeżeli moje osiągnięcie naukowe będzie wykazywane przez Akademię \
Górniczo-Hutniczą im. Stanisława Staszica w Krakowie na potrzeby ewaluacji Uczelni, niniejszym \
upoważniam Akademię Górniczo-Hutniczą im. Stanisława Staszica w Krakowie do wykazania osiągnięcia \
wymienionego w powyższej tabeli jako powstałego w związku z prowadzeniem przeze mnie działalności \
naukowej albo kształceniem w Akademii Górniczo-Hutniczej im. Stanisława Staszica w Krakowie.";

const SIGNATURE_PLACEHOLDER: &str = "(data i czytelny podpis)";

const INSTRUCTIONS_HEADING: &str = "<b>Pouczenia:</b>";

const INSTRUCTIONS: [&str; 5] = [
    "Zgodnie z art. 265 ust. 12 ustawy, na potrzeby ewaluacji osiągnięcia jednej osoby mogą być \
wykazywane w ramach nie więcej niż 2 dyscyplin, przy czym dane osiągnięcie może być wykazane przez \
osobę będącą jego autorem tylko raz i tylko w ramach jednej dyscypliny.",
    "Zgodnie z art. 265 ust. 6 ustawy, należy wskazać te osiągnięcia, które powstały w związku z \
zatrudnieniem lub odbywaniem kształcenia w podmiocie, w którym składa się niniejsze oświadczenie.",
    "Osiągnięcia można wykazać tylko w dyscyplinie, która jest uwzględniona w oświadczeniu o \
dziedzinie i dyscyplinie naukowej, o którym mowa w art. 343 ust. 7.",
    "Szczegółowa informacja znajduje się na stronie Bibliografii Publikacji Pracowników AGH, a w \
razie wątpliwości proszę kontaktować się z pracownikami Oddziału Informacji Naukowej Biblioteki \
Głównej - tel. 617-32-15, e-mail: oin@bg.agh.edu.pl",
    "Oświadczenie to powinno zostać złożone nie później niż do 31 grudnia roku poprzedzającego rok \
przeprowadzenia ewaluacji jakości działalności naukowej lub przed zakończeniem stosunku pracy w \
danym podmiocie.",
];

/// Personal data printed on every declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarantProfile {
    pub name: String,
    pub orcid: String,
    pub unit: String,
    pub authors: String,
    pub discipline: String,
}

impl Default for DeclarantProfile {
    fn default() -> Self {
        Self {
            name: "Sabin Hashmi".to_string(),
            orcid: "0000-0003-2714-2706".to_string(),
            unit: "Wydział Fizyki i Informatyki Stosowanej".to_string(),
            authors: "R. Aaij, [et al.], S. BASHIR, [et al.], M. FIRLEJ, [et al.], \
                T. FIUTOWSKI, [et al.], W. GOMUŁKA, [et al.], S. HASHMI, [et al.], \
                M. IDZIK, [et al.], J. MOROŃ, [et al.], A. OBŁĄKOWSKA-MUCHA, [et al.], \
                K. ŚWIENTEK, [et al.], T. SZUMLAK, [et al.], A. UKLEJA, [et al.]"
                .to_string(),
            discipline: "nauki fizyczne".to_string(),
        }
    }
}

/// Builds the block sequence of one declaration. `translated_title` is the
/// title after markup translation; journal and year lines appear only when
/// non-empty.
pub fn build_blocks(
    input: &DeclarationInput,
    translated_title: &str,
    profile: &DeclarantProfile,
) -> Vec<DocumentBlock> {
    let mut blocks = vec![
        DocumentBlock::paragraph(StyleName::Title, HEADING),
        DocumentBlock::spacer(cm(0.3)),
        DocumentBlock::paragraph(
            StyleName::BoldLeft,
            format!("Imię i nazwisko: <b>{}</b>", profile.name),
        ),
        DocumentBlock::spacer(cm(0.2)),
        DocumentBlock::paragraph(StyleName::BodyLeft, format!("ORCID: {}", profile.orcid)),
        DocumentBlock::spacer(cm(0.2)),
        DocumentBlock::paragraph(
            StyleName::BodyLeft,
            format!("<b>Jednostka organizacyjna:</b> {}", profile.unit),
        ),
        DocumentBlock::spacer(cm(0.4)),
        DocumentBlock::paragraph(StyleName::BodyJustified, DECLARATION_1),
        DocumentBlock::spacer(cm(0.4)),
        DocumentBlock::paragraph(StyleName::BodyLeft, format!("<b>{}</b>", translated_title)),
        DocumentBlock::paragraph(StyleName::BodyLeft, profile.authors.as_str()),
    ];

    if !input.journal.is_empty() {
        blocks.push(DocumentBlock::paragraph(StyleName::BodyLeft, input.journal.as_str()));
    }
    if !input.year.is_empty() {
        blocks.push(DocumentBlock::paragraph(StyleName::BodyLeft, input.year.as_str()));
    }

    blocks.extend([
        DocumentBlock::spacer(cm(0.2)),
        DocumentBlock::paragraph(StyleName::BoldRight, format!("<b>{}</b>", profile.discipline)),
        DocumentBlock::spacer(cm(0.5)),
        DocumentBlock::paragraph(StyleName::BodyJustified, DECLARATION_2),
        DocumentBlock::spacer(cm(1.0)),
        DocumentBlock::paragraph(StyleName::NormalRight, SIGNATURE_PLACEHOLDER),
        DocumentBlock::spacer(cm(0.8)),
        DocumentBlock::paragraph(StyleName::BoldLeft, INSTRUCTIONS_HEADING),
        DocumentBlock::spacer(cm(0.2)),
    ]);

    for instruction in INSTRUCTIONS {
        blocks.push(DocumentBlock::paragraph(StyleName::SmallPrint, instruction));
        blocks.push(DocumentBlock::spacer(cm(0.2)));
    }

    blocks
}
