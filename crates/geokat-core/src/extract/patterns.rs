//! Compiled patterns for survey document field extraction.
//!
//! The cascades are ordered most-specific first; extraction stops at the
//! first pattern that matches. All patterns are case-insensitive because
//! OCR output mangles letter case freely.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Communication-type field labels, tried before bare type mentions
    pub static ref COMM_TYPE_LABELS: Vec<Regex> = vec![
        Regex::new(r"(?i)Вид\s*коммуникации/здания,\s*сооружения:\s*([^\n]+)").unwrap(),
        Regex::new(r"(?i)Вид\s*коммуникации[^\n:]*[:\s]*([^\n]+)").unwrap(),
        Regex::new(r"(?i)Тип\s*коммуникации[^\n:]*[:\s]*([^\n]+)").unwrap(),
        Regex::new(r"(?i)Коммуникац[ияи][^\n:]*[:\s]*([^\n]+)").unwrap(),
    ];

    // Bare mentions of known type names anywhere in the text
    pub static ref COMM_TYPE_DIRECT: Vec<Regex> = vec![
        Regex::new(r"(?i)Кабель\s*связи\b").unwrap(),
        Regex::new(r"(?i)Тел\s*канализац[ия]{2,4}\b").unwrap(),
        Regex::new(r"(?i)Кабельная\s*канализац[ия]{2,4}\b").unwrap(),
        Regex::new(r"(?i)ВОЛС\b").unwrap(),
        Regex::new(r"(?i)КТВ\b").unwrap(),
        Regex::new(r"(?i)Эл\s*кабель\b").unwrap(),
        Regex::new(r"(?i)Кабель\s*техн\.?\s*и\s*очаг\.?\s*заземл\b").unwrap(),
        Regex::new(r"(?i)Контур\s*заземл\b").unwrap(),
        Regex::new(r"(?i)Кабель\s*н[оo0]\b").unwrap(),
        Regex::new(r"(?i)Водосток\b").unwrap(),
        Regex::new(r"(?i)Вод-?д\b").unwrap(),
        Regex::new(r"(?i)Трубопровод\b").unwrap(),
        Regex::new(r"(?i)Канализац[ия]{2,4}\s*хоз-?быт\b").unwrap(),
        Regex::new(r"(?i)ЛОС\b").unwrap(),
        Regex::new(r"(?i)Дренаж\b").unwrap(),
        Regex::new(r"(?i)Воздухопровод\b").unwrap(),
        Regex::new(r"(?i)Вент\.?\s*ветки\b").unwrap(),
        Regex::new(r"(?i)Теплотрасса\b").unwrap(),
        Regex::new(r"(?i)Коллектор\b").unwrap(),
        Regex::new(r"(?i)Газопровод\b").unwrap(),
        Regex::new(r"(?i)Нефтепровод\b").unwrap(),
        Regex::new(r"(?i)Продуктопровод\b").unwrap(),
        Regex::new(r"(?i)СОУЭ\b").unwrap(),
        Regex::new(r"(?i)СКУД\b").unwrap(),
        Regex::new(r"(?i)\bКанализац(ия)?\b").unwrap(),
        Regex::new(r"(?i)Нап\s*канализац").unwrap(),
        Regex::new(r"(?i)Сам\s*канализац").unwrap(),
        Regex::new(r"(?i)Водовыпуск\b").unwrap(),
        Regex::new(r"(?i)Кабель\s*защ\b").unwrap(),
        Regex::new(r"(?i)\bГаз\b").unwrap(),
        Regex::new(r"(?i)\bТепл\b").unwrap(),
    ];

    // Contract-number field labels
    pub static ref CONTRACT_LABELS: Vec<Regex> = vec![
        Regex::new(
            r"(?i)№\s*договора\s*\(?соглашения\)?\s*на\s*проведение\s*работ[^\n:]*[:\s]*([^\n,;]+)"
        )
        .unwrap(),
        Regex::new(r"(?i)№\s*договора[^\n:]*[:\s]*([^\n,;]+)").unwrap(),
        Regex::new(r"(?i)Договор\s*№\s*(\S+)").unwrap(),
        Regex::new(r"(?i)№\s*контракта[^\n:]*[:\s]*(\S+)").unwrap(),
    ];

    /// Characters removed from a raw contract-number candidate.
    pub static ref CONTRACT_JUNK: Regex = Regex::new(r"[^0-9A-Za-zА-Яа-я/\-]").unwrap();

    /// Known contract-code shapes, widest first. Narrows a cleaned
    /// candidate down to the code itself when one of the shapes is
    /// embedded in surrounding text.
    pub static ref CONTRACT_SHAPES: Regex = Regex::new(
        r"(?i)(\b\d+/[A-ZА-Я]+/[\wА-Яа-я]+\-?\d+/\d+\b|\b\d+/[A-ZА-Я]+\-?\d+/\d+\b|\b\d+/\d+\-?\d+\b|\b\d+/[A-ZА-Я]+\-\d+\b|\b\d{1,2}/\d{5}\-?\d{1,2}\b|\b\d{1,2}/\d{5}\b|\b[A-ZА-Я]+\-\d+/\d+\b|\b\d{1,5}[A-ZА-Я]*[-/]\d{1,5}\b)"
    )
    .unwrap();

    // Document identifier (КГС number) cascade
    pub static ref KGS_CASCADE: Vec<Regex> = vec![
        Regex::new(r"(?i)№ КГС:\s*(\d{2,5}[-/]\d{2,5})").unwrap(),
        Regex::new(r"(?i)№ КГС:\s*([A-ZА-Я]?\d+[A-ZА-Я]?)").unwrap(),
        Regex::new(r"(?i)(?:КГС|№|N)\s*[:\-]?\s*(\d{2,5}[-/]\d{2,5})").unwrap(),
        Regex::new(r"(?i)(?:КГС|№|N)\s*[:\-]?\s*([A-ZА-Я]?\d+[A-ZА-Я]?)").unwrap(),
        Regex::new(r"(?i)КГС\s*([^\n,;]+)").unwrap(),
        Regex::new(r"\b(\d{2,5}-\d{2,5})\b").unwrap(),
        Regex::new(r"\b(\d{5}-\d{2})\b").unwrap(),
    ];

    /// Characters removed from a raw document-id candidate.
    pub static ref KGS_JUNK: Regex = Regex::new(r"[^\dА-ЯA-Z/\-]").unwrap();

    // Survey-date cascade; dates stay dd.mm.yyyy strings
    pub static ref SURVEY_DATE_CASCADE: Vec<Regex> = vec![
        Regex::new(r"(?i)Дата\s*съ[её]мки\s*[:\s]*([0-9]{2}\.[0-9]{2}\.[0-9]{4})").unwrap(),
        Regex::new(r"(?i)Съемка\s*от\s*([0-9]{2}\.[0-9]{2}\.[0-9]{4})").unwrap(),
        Regex::new(r"\b\d{2}\.\d{2}\.\d{4}\b").unwrap(),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comm_type_label_captures_rest_of_line() {
        let caps = COMM_TYPE_LABELS[0]
            .captures("Вид коммуникации/здания, сооружения: Кабель связи\nдалее")
            .unwrap();
        assert_eq!(&caps[1], "Кабель связи");
    }

    #[test]
    fn contract_shapes_pick_out_embedded_codes() {
        for (input, expected) in [
            ("12/5678-90", "12/5678-90"),
            ("-12/АБ-34/56-", "12/АБ-34/56"),
            ("АБ-12/34", "АБ-12/34"),
            ("от 123-456, далее", "123-456"),
        ] {
            let caps = CONTRACT_SHAPES.captures(input).unwrap();
            assert_eq!(&caps[1], expected, "input: {input}");
        }
    }

    #[test]
    fn kgs_cascade_prefers_labeled_pairs() {
        let text = "№ КГС: 123-45 и где-то ещё 99999-11";
        let caps = KGS_CASCADE[0].captures(text).unwrap();
        assert_eq!(&caps[1], "123-45");
    }

    #[test]
    fn date_cascade_handles_both_spellings() {
        assert!(SURVEY_DATE_CASCADE[0].is_match("Дата съёмки: 12.05.2024"));
        assert!(SURVEY_DATE_CASCADE[0].is_match("дата съемки 01.02.2023"));
        assert!(SURVEY_DATE_CASCADE[2].is_match("произвольно 31.12.2022 текст"));
    }
}
