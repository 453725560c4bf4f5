//! Builtin export schemas, one per extraction tool.
//!
//! The backend names its extraction pipelines by slug. `dataprocess` is
//! the full SDS layout; the customer tools carry trimmed layouts agreed
//! with the respective customer. The free/demo/clone pipelines share the
//! `dataprocess` layout.

use super::schema::{Column, ExportSchema};

const WIDTH: f64 = 22.0;

/// Slugs with a builtin schema, in display order.
pub const KNOWN: &[&str] = &[
    "dataprocess",
    "freedataprocess",
    "demodataprocess",
    "clonedataprocess",
    "werthenbach",
    "scheren",
    "sennheiser",
    "verbund",
];

/// Resolve a tool slug to its schema. Slugs are case-insensitive.
pub fn builtin(slug: &str) -> Option<ExportSchema> {
    let slug = slug.trim().to_lowercase();
    let canonical = match slug.as_str() {
        "freedataprocess" | "demodataprocess" | "clonedataprocess" => "dataprocess",
        other => other,
    };
    match canonical {
        "dataprocess" => Some(dataprocess()),
        "werthenbach" => Some(werthenbach()),
        "scheren" => Some(scheren()),
        "sennheiser" => Some(sennheiser()),
        "verbund" => Some(verbund()),
        _ => None,
    }
}

/// Column whose header matches its record field.
fn col(name: &'static str) -> Column {
    Column {
        header: name,
        field: name,
    }
}

/// Column with a header differing from its record field.
fn renamed(header: &'static str, field: &'static str) -> Column {
    Column { header, field }
}

/// The full SDS layout, one column per extracted field in SDS section
/// order (identification, hazards, storage, physical data, toxicology,
/// transport, exposure, disposal, document data).
fn dataprocess() -> ExportSchema {
    ExportSchema {
        tool: "dataprocess",
        columns: vec![
            col("Produktname"),
            col("Hersteller"),
            col("Artikelnummer"),
            col("CAS-Nummer"),
            col("EG-Nummer"),
            col("Indexnummer"),
            col("REACH-Registrierungsnummer"),
            col("Verwendungszweck"),
            col("Einstufung(CLP)"),
            col("Signalwort"),
            col("GHS-Piktogramme"),
            col("H-Sätze"),
            col("EUH-Sätze"),
            col("P-Sätze"),
            col("WGK(numerischer Wert)"),
            col("Lagerklasse(TRGS 510)"),
            col("Zusammenlagerungshinweise"),
            col("Lagertemperatur"),
            col("Aggregatzustand"),
            col("Farbe"),
            col("Geruch"),
            col("pH-Wert"),
            col("Schmelzpunkt"),
            col("Siedepunkt"),
            col("Flammpunkt"),
            col("Zündtemperatur"),
            col("Untere Explosionsgrenze"),
            col("Obere Explosionsgrenze"),
            col("Dampfdruck"),
            col("Dichte"),
            col("Schüttdichte"),
            col("Wasserlöslichkeit"),
            col("Viskosität(kinematisch)"),
            col("LD50(oral)"),
            col("LD50(dermal)"),
            col("LC50(inhalativ)"),
            col("UN-Nummer"),
            col("Offizielle Benennung(Transport)"),
            col("ADR-Klasse"),
            col("Verpackungsgruppe"),
            col("Gefahrzettel"),
            col("Tunnelbeschränkungscode"),
            col("IMDG-Klasse"),
            col("ICAO-Klasse"),
            col("Umweltgefährdend(Transport)"),
            col("AGW(mg/m³)"),
            col("AGW(ml/m³)"),
            col("DNEL(Arbeiter)"),
            col("PNEC(Wasser)"),
            col("Atemschutz"),
            col("Handschutz(Material)"),
            col("Handschutz(Durchbruchzeit)"),
            col("Augenschutz"),
            col("Körperschutz"),
            col("Geeignete Löschmittel"),
            col("Ungeeignete Löschmittel"),
            col("Entsorgung(Abfallschlüssel)"),
            col("Störfallverordnung(12. BImSchV)"),
            col("Erstellungsdatum"),
            col("Überarbeitungsdatum"),
            col("Version(SDB)"),
            col("Anzahl fehlender Abschnitte"),
            col("Dateiname"),
        ],
        key_field: "Produktname",
        missing_field: Some("Anzahl fehlender Abschnitte"),
        filler_row: true,
        column_width: WIDTH,
    }
}

/// Storage-equipment customer: identification, hazard communication,
/// storage and transport fields.
fn werthenbach() -> ExportSchema {
    ExportSchema {
        tool: "werthenbach",
        columns: vec![
            col("Produktname"),
            col("Hersteller"),
            col("Artikelnummer"),
            col("CAS-Nummer"),
            col("EG-Nummer"),
            col("Verwendungszweck"),
            col("Signalwort"),
            col("GHS-Piktogramme"),
            col("H-Sätze"),
            col("EUH-Sätze"),
            col("P-Sätze"),
            renamed("WGK", "WGK(numerischer Wert)"),
            renamed("Lagerklasse", "Lagerklasse(TRGS 510)"),
            col("Zusammenlagerungshinweise"),
            col("Lagertemperatur"),
            col("Aggregatzustand"),
            col("Farbe"),
            col("pH-Wert"),
            col("Flammpunkt"),
            col("Zündtemperatur"),
            col("Untere Explosionsgrenze"),
            col("Obere Explosionsgrenze"),
            col("Dichte"),
            col("Wasserlöslichkeit"),
            col("UN-Nummer"),
            col("Offizielle Benennung(Transport)"),
            col("ADR-Klasse"),
            col("Verpackungsgruppe"),
            col("Gefahrzettel"),
            col("Tunnelbeschränkungscode"),
            col("Geeignete Löschmittel"),
            renamed("Abfallschlüssel", "Entsorgung(Abfallschlüssel)"),
            col("Erstellungsdatum"),
            col("Überarbeitungsdatum"),
            col("Anzahl fehlender Abschnitte"),
        ],
        key_field: "Produktname",
        missing_field: Some("Anzahl fehlender Abschnitte"),
        filler_row: false,
        column_width: WIDTH,
    }
}

/// Tooling customer: occupational-exposure and protective-equipment
/// fields alongside the core identification block.
fn scheren() -> ExportSchema {
    ExportSchema {
        tool: "scheren",
        columns: vec![
            col("Produktname"),
            col("Hersteller"),
            col("Artikelnummer"),
            col("CAS-Nummer"),
            col("Verwendungszweck"),
            col("Signalwort"),
            col("GHS-Piktogramme"),
            col("H-Sätze"),
            col("P-Sätze"),
            renamed("WGK", "WGK(numerischer Wert)"),
            renamed("Lagerklasse", "Lagerklasse(TRGS 510)"),
            col("Aggregatzustand"),
            col("pH-Wert"),
            col("Flammpunkt"),
            col("Dichte"),
            col("AGW(mg/m³)"),
            col("AGW(ml/m³)"),
            col("DNEL(Arbeiter)"),
            col("Atemschutz"),
            col("Handschutz(Material)"),
            col("Handschutz(Durchbruchzeit)"),
            col("Augenschutz"),
            col("Körperschutz"),
            col("LD50(oral)"),
            col("LC50(inhalativ)"),
            col("UN-Nummer"),
            col("ADR-Klasse"),
            renamed("Abfallschlüssel", "Entsorgung(Abfallschlüssel)"),
            col("Erstellungsdatum"),
            col("Anzahl fehlender Abschnitte"),
            col("Dateiname"),
        ],
        key_field: "Produktname",
        missing_field: Some("Anzahl fehlender Abschnitte"),
        filler_row: false,
        column_width: WIDTH,
    }
}

/// Electronics-manufacturing customer.
fn sennheiser() -> ExportSchema {
    ExportSchema {
        tool: "sennheiser",
        columns: vec![
            col("Produktname"),
            col("Hersteller"),
            col("Artikelnummer"),
            col("CAS-Nummer"),
            col("EG-Nummer"),
            col("Verwendungszweck"),
            col("Einstufung(CLP)"),
            col("Signalwort"),
            col("GHS-Piktogramme"),
            col("H-Sätze"),
            col("P-Sätze"),
            renamed("WGK", "WGK(numerischer Wert)"),
            renamed("Lagerklasse", "Lagerklasse(TRGS 510)"),
            col("Lagertemperatur"),
            col("Aggregatzustand"),
            col("Farbe"),
            col("Geruch"),
            col("pH-Wert"),
            col("Siedepunkt"),
            col("Flammpunkt"),
            col("Dichte"),
            col("Wasserlöslichkeit"),
            col("AGW(mg/m³)"),
            col("Atemschutz"),
            col("Handschutz(Material)"),
            col("Augenschutz"),
            col("UN-Nummer"),
            col("ADR-Klasse"),
            col("Verpackungsgruppe"),
            renamed("Abfallschlüssel", "Entsorgung(Abfallschlüssel)"),
            col("Dateiname"),
            col("Anzahl fehlender Abschnitte"),
        ],
        key_field: "Produktname",
        missing_field: Some("Anzahl fehlender Abschnitte"),
        filler_row: false,
        column_width: WIDTH,
    }
}

/// Chemical-park customer: broad layout with regulatory and full
/// transport classification.
fn verbund() -> ExportSchema {
    ExportSchema {
        tool: "verbund",
        columns: vec![
            col("Produktname"),
            col("Hersteller"),
            col("Artikelnummer"),
            col("CAS-Nummer"),
            col("EG-Nummer"),
            col("Indexnummer"),
            col("REACH-Registrierungsnummer"),
            col("Einstufung(CLP)"),
            col("Signalwort"),
            col("GHS-Piktogramme"),
            col("H-Sätze"),
            col("EUH-Sätze"),
            col("P-Sätze"),
            renamed("WGK", "WGK(numerischer Wert)"),
            renamed("Lagerklasse", "Lagerklasse(TRGS 510)"),
            col("Zusammenlagerungshinweise"),
            col("Aggregatzustand"),
            col("pH-Wert"),
            col("Schmelzpunkt"),
            col("Siedepunkt"),
            col("Flammpunkt"),
            col("Zündtemperatur"),
            col("Dampfdruck"),
            col("Dichte"),
            col("Wasserlöslichkeit"),
            col("UN-Nummer"),
            col("Offizielle Benennung(Transport)"),
            col("ADR-Klasse"),
            col("Verpackungsgruppe"),
            col("Tunnelbeschränkungscode"),
            col("IMDG-Klasse"),
            col("Umweltgefährdend(Transport)"),
            col("Störfallverordnung(12. BImSchV)"),
            renamed("Abfallschlüssel", "Entsorgung(Abfallschlüssel)"),
            col("Erstellungsdatum"),
            col("Überarbeitungsdatum"),
            col("Anzahl fehlender Abschnitte"),
            col("Dateiname"),
        ],
        key_field: "Produktname",
        missing_field: Some("Anzahl fehlender Abschnitte"),
        filler_row: false,
        column_width: WIDTH,
    }
}
