// src/deck/pptx.rs
//! Minimal PresentationML writer.
//!
//! One master, one "Title and Content" layout, one theme. Every slide gets a
//! title placeholder and a body placeholder; footers are free text boxes and
//! navigation controls are preset action-button shapes whose click target is
//! a slide relationship.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::config::consts::FOOTER_RGB;
use crate::error::Result;
use crate::file::ensure_parent;

use super::{Button, Deck};

// 4:3 slide in EMU
const SLIDE_W: i64 = 9_144_000;
const SLIDE_H: i64 = 6_858_000;
const INCH: i64 = 914_400;
/// Button edge length and margin from the slide border.
const CTRL: i64 = INCH * 3 / 4;

const NS: &str = concat!(
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#,
);
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const SLIDE_LINK: &str = "ppaction://hlinksldjump";
const LANG: &str = "pt-PT";

#[derive(Clone, Debug, Default)]
struct PptxSlide {
    title: String,
    body: Option<String>,
    footer: Option<String>,
    links: Vec<(String, usize)>,
    buttons: Vec<(Button, usize)>,
}

#[derive(Clone, Debug, Default)]
pub struct PptxDeck {
    slides: Vec<PptxSlide>,
}

impl PptxDeck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// The whole package in memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let opts = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);

        let mut part = |name: &str, xml: &str| -> Result<()> {
            zip.start_file(name, opts)?;
            zip.write_all(xml.as_bytes())?;
            Ok(())
        };

        part("[Content_Types].xml", &self.content_types_xml())?;
        part("_rels/.rels", &package_rels_xml())?;
        part("ppt/presentation.xml", &self.presentation_xml())?;
        part("ppt/_rels/presentation.xml.rels", &self.presentation_rels_xml())?;
        part("ppt/slideMasters/slideMaster1.xml", &master_xml())?;
        part("ppt/slideMasters/_rels/slideMaster1.xml.rels", &master_rels_xml())?;
        part("ppt/slideLayouts/slideLayout1.xml", &layout_xml())?;
        part("ppt/slideLayouts/_rels/slideLayout1.xml.rels", &layout_rels_xml())?;
        part("ppt/theme/theme1.xml", THEME_XML)?;

        for (i, slide) in self.slides.iter().enumerate() {
            let n = i + 1;
            let (xml, rels) = slide_parts(slide);
            part(&format!("ppt/slides/slide{n}.xml"), &xml)?;
            part(&format!("ppt/slides/_rels/slide{n}.xml.rels"), &rels)?;
        }

        Ok(zip.finish()?.into_inner())
    }

    fn content_types_xml(&self) -> String {
        let ct = "application/vnd.openxmlformats-officedocument";
        let mut x = join!(XML_DECL, r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
        x.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
        x.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
        push_fmt!(x, r#"<Override PartName="/ppt/presentation.xml" ContentType="{ct}.presentationml.presentation.main+xml"/>"#);
        push_fmt!(x, r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="{ct}.presentationml.slideMaster+xml"/>"#);
        push_fmt!(x, r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="{ct}.presentationml.slideLayout+xml"/>"#);
        push_fmt!(x, r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="{ct}.theme+xml"/>"#);
        for n in 1..=self.slides.len() {
            push_fmt!(x, r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="{ct}.presentationml.slide+xml"/>"#);
        }
        x.push_str("</Types>");
        x
    }

    // rId1 master, rId2 theme, rId3.. slides
    fn presentation_xml(&self) -> String {
        let mut x = join!(XML_DECL, "<p:presentation ", NS, ">");
        x.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
        if !self.slides.is_empty() {
            x.push_str("<p:sldIdLst>");
            for i in 0..self.slides.len() {
                push_fmt!(x, r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 3);
            }
            x.push_str("</p:sldIdLst>");
        }
        push_fmt!(x, r#"<p:sldSz cx="{SLIDE_W}" cy="{SLIDE_H}" type="screen4x3"/>"#);
        x.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        x.push_str("</p:presentation>");
        x
    }

    fn presentation_rels_xml(&self) -> String {
        let mut x = join!(XML_DECL, r#"<Relationships xmlns=""#, REL_NS, r#"">"#);
        push_fmt!(x, r#"<Relationship Id="rId1" Type="{REL_TYPE}/slideMaster" Target="slideMasters/slideMaster1.xml"/>"#);
        push_fmt!(x, r#"<Relationship Id="rId2" Type="{REL_TYPE}/theme" Target="theme/theme1.xml"/>"#);
        for i in 0..self.slides.len() {
            push_fmt!(x, r#"<Relationship Id="rId{}" Type="{REL_TYPE}/slide" Target="slides/slide{}.xml"/>"#, i + 3, i + 1);
        }
        x.push_str("</Relationships>");
        x
    }
}

impl Deck for PptxDeck {
    type Slide = usize;

    fn add_slide(&mut self) -> usize {
        self.slides.push(PptxSlide::default());
        self.slides.len() - 1
    }

    fn set_title(&mut self, slide: usize, text: &str) {
        self.slides[slide].title = s!(text);
    }

    fn set_body(&mut self, slide: usize, text: &str) {
        self.slides[slide].body = Some(s!(text));
    }

    fn set_footer(&mut self, slide: usize, text: &str) {
        self.slides[slide].footer = Some(s!(text));
    }

    fn add_button(&mut self, slide: usize, button: Button, target: usize) {
        self.slides[slide].buttons.push((button, target));
    }

    fn add_link(&mut self, slide: usize, text: &str, target: usize) {
        self.slides[slide].links.push((s!(text), target));
    }

    fn save(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

/* ---------------- slide parts ---------------- */

/// Slide XML and its relationships. rId1 is the layout; every link and
/// button target gets its own relationship after that.
fn slide_parts(slide: &PptxSlide) -> (String, String) {
    let mut rels = join!(XML_DECL, r#"<Relationships xmlns=""#, REL_NS, r#"">"#);
    push_fmt!(rels, r#"<Relationship Id="rId1" Type="{REL_TYPE}/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#);
    let mut next_rel = 2usize;
    let mut relate = |target: usize| -> String {
        let id = format!("rId{next_rel}");
        push_fmt!(rels, r#"<Relationship Id="{id}" Type="{REL_TYPE}/slide" Target="slide{}.xml"/>"#, target + 1);
        next_rel += 1;
        id
    };

    let mut x = join!(XML_DECL, "<p:sld ", NS, "><p:cSld><p:spTree>");
    x.push_str(GROUP_PROPS);
    let mut shape_id = 2usize;

    // Title
    push_fmt!(
        x,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{shape_id}" name="Title"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{}</p:txBody></p:sp>"#,
        paragraph(&slide.title, None)
    );
    shape_id += 1;

    // Body: plain text lines, then one clickable paragraph per link
    if slide.body.is_some() || !slide.links.is_empty() {
        let mut paras = String::new();
        if let Some(body) = &slide.body {
            for line in body.lines() {
                paras.push_str(&paragraph(line, None));
            }
        }
        for (text, target) in &slide.links {
            let rid = relate(*target);
            paras.push_str(&paragraph(text, Some(&rid)));
        }
        push_fmt!(
            x,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{shape_id}" name="Content"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/>{paras}</p:txBody></p:sp>"#
        );
        shape_id += 1;
    }

    if let Some(footer) = &slide.footer {
        push_fmt!(
            x,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{shape_id}" name="Footer"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/></p:spPr><p:txBody><a:bodyPr wrap="square"/><a:lstStyle/><a:p><a:pPr algn="ctr"/><a:r><a:rPr lang="{LANG}" dirty="0"><a:solidFill><a:srgbClr val="{FOOTER_RGB}"/></a:solidFill></a:rPr><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>"#,
            xfrm(2 * CTRL, SLIDE_H - CTRL, SLIDE_W - 4 * CTRL, CTRL),
            xml_escape(footer)
        );
        shape_id += 1;
    }

    for (button, target) in &slide.buttons {
        let rid = relate(*target);
        let (name, preset, slot) = match button {
            Button::Home => ("Home", "actionButtonHome", 1),
            Button::Help => ("Answer", "actionButtonHelp", 2),
            Button::Back => ("Question", "actionButtonBackPrevious", 2),
        };
        push_fmt!(
            x,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{shape_id}" name="{name}"><a:hlinkClick r:id="{rid}" action="{SLIDE_LINK}"/></p:cNvPr><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr>{}<a:prstGeom prst="{preset}"><a:avLst/></a:prstGeom><a:solidFill><a:schemeClr val="accent1"/></a:solidFill></p:spPr></p:sp>"#,
            xfrm(SLIDE_W - slot * CTRL, SLIDE_H - CTRL, CTRL, CTRL)
        );
        shape_id += 1;
    }

    x.push_str(r#"</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#);
    rels.push_str("</Relationships>");
    (x, rels)
}

/// One paragraph with a single run; `link` is the relationship id to jump through.
fn paragraph(text: &str, link: Option<&str>) -> String {
    let click = link
        .map(|rid| format!(r#"<a:hlinkClick r:id="{rid}" action="{SLIDE_LINK}"/>"#))
        .unwrap_or_default();
    if click.is_empty() {
        format!(r#"<a:p><a:r><a:rPr lang="{LANG}" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#, xml_escape(text))
    } else {
        format!(r#"<a:p><a:r><a:rPr lang="{LANG}" dirty="0">{click}</a:rPr><a:t>{}</a:t></a:r></a:p>"#, xml_escape(text))
    }
}

fn xfrm(x: i64, y: i64, cx: i64, cy: i64) -> String {
    format!(r#"<a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#)
}

pub fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // XML 1.0 forbids most control characters outright
            c if c.is_control() && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}

/* ---------------- fixed parts ---------------- */

const GROUP_PROPS: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
);

fn package_rels_xml() -> String {
    join!(
        XML_DECL,
        r#"<Relationships xmlns=""#, REL_NS, r#"">"#,
        r#"<Relationship Id="rId1" Type=""#, REL_TYPE, r#"/officeDocument" Target="ppt/presentation.xml"/>"#,
        "</Relationships>"
    )
}

/// Placeholder geometry lives on the master; layout and slides inherit it.
fn master_xml() -> String {
    let mut x = join!(XML_DECL, "<p:sldMaster ", NS, ">");
    x.push_str(r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>"#);
    x.push_str(GROUP_PROPS);
    push_fmt!(
        x,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title Placeholder"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr>{}</p:spPr><p:txBody><a:bodyPr anchor="ctr"/><a:lstStyle/><a:p/></p:txBody></p:sp>"#,
        xfrm(INCH / 2, INCH / 4, SLIDE_W - INCH, INCH * 5 / 4)
    );
    push_fmt!(
        x,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Text Placeholder"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr>{}</p:spPr><p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>"#,
        xfrm(INCH / 2, INCH * 7 / 4, SLIDE_W - INCH, SLIDE_H - INCH * 7 / 4 - INCH)
    );
    x.push_str("</p:spTree></p:cSld>");
    x.push_str(concat!(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
        r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
    ));
    x.push_str(r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#);
    x.push_str(concat!(
        "<p:txStyles>",
        r#"<p:titleStyle><a:lvl1pPr algn="ctr"><a:defRPr sz="4000"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mj-lt"/></a:defRPr></a:lvl1pPr></p:titleStyle>"#,
        r#"<p:bodyStyle><a:lvl1pPr marL="0" indent="0"><a:buNone/><a:defRPr sz="2800"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr></p:bodyStyle>"#,
        r#"<p:otherStyle><a:lvl1pPr><a:defRPr sz="1800"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:lvl1pPr></p:otherStyle>"#,
        "</p:txStyles>",
    ));
    x.push_str("</p:sldMaster>");
    x
}

fn master_rels_xml() -> String {
    join!(
        XML_DECL,
        r#"<Relationships xmlns=""#, REL_NS, r#"">"#,
        r#"<Relationship Id="rId1" Type=""#, REL_TYPE, r#"/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>"#,
        r#"<Relationship Id="rId2" Type=""#, REL_TYPE, r#"/theme" Target="../theme/theme1.xml"/>"#,
        "</Relationships>"
    )
}

fn layout_xml() -> String {
    let mut x = join!(XML_DECL, "<p:sldLayout ", NS, r#" type="obj" preserve="1">"#);
    x.push_str(r#"<p:cSld name="Title and Content"><p:spTree>"#);
    x.push_str(GROUP_PROPS);
    x.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Title"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>"#);
    x.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Content"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph idx="1"/></p:nvPr></p:nvSpPr><p:spPr/><p:txBody><a:bodyPr/><a:lstStyle/><a:p/></p:txBody></p:sp>"#);
    x.push_str(r#"</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#);
    x
}

fn layout_rels_xml() -> String {
    join!(
        XML_DECL,
        r#"<Relationships xmlns=""#, REL_NS, r#"">"#,
        r#"<Relationship Id="rId1" Type=""#, REL_TYPE, r#"/slideMaster" Target="../slideMasters/slideMaster1.xml"/>"#,
        "</Relationships>"
    )
}

const THEME_XML: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Quiz">"#,
    "<a:themeElements>",
    r#"<a:clrScheme name="Quiz">"#,
    r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#,
    r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
    r#"<a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2>"#,
    r#"<a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2>"#,
    r#"<a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4>"#,
    r#"<a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6>"#,
    r#"<a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink>"#,
    "</a:clrScheme>",
    r#"<a:fontScheme name="Quiz">"#,
    r#"<a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
    r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
    "</a:fontScheme>",
    r#"<a:fmtScheme name="Quiz">"#,
    "<a:fillStyleLst>",
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    "</a:fillStyleLst>",
    "<a:lnStyleLst>",
    r#"<a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    "</a:lnStyleLst>",
    "<a:effectStyleLst>",
    "<a:effectStyle><a:effectLst/></a:effectStyle>",
    "<a:effectStyle><a:effectLst/></a:effectStyle>",
    "<a:effectStyle><a:effectLst/></a:effectStyle>",
    "</a:effectStyleLst>",
    "<a:bgFillStyleLst>",
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    "</a:bgFillStyleLst>",
    "</a:fmtScheme>",
    "</a:themeElements>",
    "<a:objectDefaults/><a:extraClrSchemeLst/>",
    "</a:theme>",
);
