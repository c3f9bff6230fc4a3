#[cfg(test)]
mod tests {
    use crate::context::TransformContext;
    use crate::ir::SourceNode;
    use crate::options::TransformOptions;
    use crate::transform::*;

    fn el(tag: &str, attrs: &[(&str, &str)], children: Vec<SourceNode>) -> SourceNode {
        SourceNode::element(tag, attrs, children)
    }

    fn text(content: &str) -> SourceNode {
        SourceNode::text(content)
    }

    fn component(children: Vec<SourceNode>) -> SourceNode {
        el("aura:component", &[("implements", "flexipage:availableForAllPageTypes")], children)
    }

    fn render(root: SourceNode) -> crate::ir::TransformOutput {
        transform_tree(&root, &TransformOptions::default())
    }

    #[test]
    fn test_directive_kind_table() {
        assert_eq!(directive_kind("aura:if"), DirectiveKind::Conditional);
        assert_eq!(directive_kind("AURA:IF"), DirectiveKind::Conditional);
        assert_eq!(directive_kind("aura:renderIf"), DirectiveKind::Conditional);
        assert_eq!(directive_kind("aura:iteration"), DirectiveKind::Iteration);
        assert_eq!(directive_kind("aura:set"), DirectiveKind::SlotAssignment);
        assert_eq!(directive_kind("aura:html"), DirectiveKind::RawHtml);
        assert_eq!(directive_kind("lightning:messageChannel"), DirectiveKind::MessageChannel);
        assert_eq!(directive_kind("force:recordData"), DirectiveKind::RecordData);
        assert_eq!(directive_kind("aura:registerEvent"), DirectiveKind::MetadataOnly);
        assert_eq!(directive_kind("lightning:card"), DirectiveKind::Plain);
    }

    #[test]
    fn test_text_substitution_and_blank_text() {
        let mut ctx = TransformContext::default();
        assert_eq!(transform_node(&text("\n    \n"), 1, &mut ctx), "");
        assert_eq!(
            transform_node(&text("\n  Hello {!v.name}\n"), 2, &mut ctx),
            "        Hello {name}"
        );
    }

    // Scenario A
    #[test]
    fn test_metadata_only_emits_nothing() {
        let out = render(component(vec![
            el("aura:attribute", &[("name", "title"), ("type", "String")], vec![]),
            el("aura:handler", &[("name", "init"), ("value", "{!this}"), ("action", "{!c.doInit}")], vec![]),
            el("aura:registerEvent", &[("name", "select"), ("type", "c:selectEvent")], vec![]),
            el("aura:method", &[("name", "reset")], vec![]),
        ]));
        assert_eq!(out.template_text, "<template>\n</template>\n");
        assert!(out.warnings.is_empty());
        assert!(out.lms_channels.is_empty());
        assert!(out.record_data_services.is_empty());
        assert!(out.detected_getters.is_empty());
    }

    #[test]
    fn test_static_tree_reproduces_structure() {
        let out = render(component(vec![el(
            "div",
            &[("class", "slds-box")],
            vec![
                el("lightning:icon", &[("iconName", "utility:info"), ("size", "small")], vec![]),
                el("c:contactTile", &[("aura:id", "tile")], vec![text("Static text")]),
            ],
        )]));
        assert_eq!(
            out.template_text,
            "<template>\n    <div class=\"slds-box\">\n        <lightning-icon icon-name=\"utility:info\" size=\"small\" />\n        <c-contact-tile data-id=\"tile\">\n            Static text\n        </c-contact-tile>\n    </div>\n</template>\n"
        );
        assert!(out.warnings.is_empty());
        assert!(out.lms_channels.is_empty());
        assert!(out.record_data_services.is_empty());
        assert_eq!(
            out.used_components.iter().cloned().collect::<Vec<_>>(),
            vec!["c-contact-tile".to_string(), "lightning-icon".to_string()]
        );
    }

    #[test]
    fn test_dynamic_attributes() {
        let out = render(el(
            "ui:button",
            &[("label", "{!v.buttonLabel}"), ("press", "{!c.handlePress}"), ("disabled", "")],
            vec![],
        ));
        assert_eq!(
            out.template_text,
            "<template>\n    <lightning-button label={buttonLabel} onclick={handlePress} disabled />\n</template>\n"
        );
    }

    #[test]
    fn test_interpolated_attribute_hoisted() {
        let out = render(el("div", &[("class", "slds-box {!v.extraClass}")], vec![]));
        assert_eq!(out.template_text, "<template>\n    <div class={computedValue1} />\n</template>\n");
        assert_eq!(out.detected_getters[0].expression, "slds-box {!v.extraClass}");
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("computedValue1"));
    }

    #[test]
    fn test_literal_attribute_kept_verbatim() {
        let out = render(el("p", &[("title", " Hi there ")], vec![]));
        assert_eq!(out.template_text, "<template>\n    <p title=\" Hi there \" />\n</template>\n");
    }

    #[test]
    fn test_whitespace_only_children_self_close() {
        let out = render(el("div", &[], vec![text("\n    "), text("\t")]));
        assert_eq!(out.template_text, "<template>\n    <div />\n</template>\n");
    }

    #[test]
    fn test_escaped_backslash_in_attribute_expression() {
        let out = render(el("p", &[("title", "{!v.sep == '\\\\' ? 'a' : 'b'}")], vec![]));
        assert_eq!(out.template_text, "<template>\n    <p title={computedValue1} />\n</template>\n");
        assert_eq!(out.detected_getters[0].expression, "v.sep == '\\\\' ? 'a' : 'b'");
    }

    // Scenario B
    #[test]
    fn test_record_data_side_channel_only() {
        let out = render(component(vec![el(
            "force:recordData",
            &[
                ("aura:id", "recordLoader"),
                ("recordId", "{!v.contactId}"),
                ("fields", "['Name','Phone']"),
            ],
            vec![],
        )]));
        assert_eq!(out.template_text, "<template>\n</template>\n");
        assert_eq!(out.record_data_services.len(), 1);
        let cfg = &out.record_data_services[0];
        assert_eq!(cfg.record_id_binding, "contactId");
        assert_eq!(cfg.fields, vec!["Name", "Phone"]);
        assert_eq!(cfg.mode, "VIEW");
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_message_channel_side_channel_only() {
        let out = render(component(vec![
            el(
                "lightning:messageChannel",
                &[("type", "RecordSelected__c"), ("aura:id", "sub"), ("onMessage", "{!c.handleMessage}")],
                vec![],
            ),
            el("lightning:messageChannel", &[("type", "Refresh__c"), ("aura:id", "pub")], vec![]),
        ]));
        assert_eq!(out.template_text, "<template>\n</template>\n");
        assert_eq!(out.lms_channels.len(), 2);
        assert!(!out.lms_channels[0].is_publisher_only);
        assert!(out.lms_channels[1].is_publisher_only);
        assert_eq!(out.warnings.len(), 2);
        assert!(out.warnings[0].contains("handleMessage"));
    }

    #[test]
    fn test_conditional_positive() {
        let out = render(el("aura:if", &[("isTrue", "{!v.showDetails}")], vec![el("p", &[], vec![text("Details")])]));
        assert_eq!(
            out.template_text,
            "<template>\n    <template lwc:if={showDetails}>\n        <p>\n            Details\n        </p>\n    </template>\n</template>\n"
        );
        assert!(out.used_directives.contains("lwc:if"));
    }

    #[test]
    fn test_conditional_negated_attribute() {
        let out = render(el("aura:if", &[("isFalse", "{!v.hasErrors}")], vec![text("All good")]));
        assert_eq!(
            out.template_text,
            "<template>\n    <template lwc:if={!hasErrors}>\n        All good\n    </template>\n</template>\n"
        );
        assert!(out.detected_getters.is_empty());
    }

    #[test]
    fn test_conditional_complex_guard_hoisted() {
        let out = render(el(
            "aura:if",
            &[("isTrue", "{!v.items.length > 0}")],
            vec![text("{!v.total}")],
        ));
        assert!(out.template_text.contains("<template lwc:if={computedValue1}>"));
        assert!(out.template_text.contains("{total}"));
        assert_eq!(out.detected_getters[0].expression, "v.items.length > 0");
    }

    #[test]
    fn test_conditional_without_condition_keeps_content() {
        let out = render(el("aura:if", &[], vec![el("span", &[], vec![text("kept")])]));
        assert!(out.template_text.contains("<!-- MANUAL CONVERSION REQUIRED: aura:if without a condition -->"));
        assert!(out.template_text.contains("kept"));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_iteration_with_index() {
        let out = render(el(
            "aura:iteration",
            &[("items", "{!v.contacts}"), ("var", "contact"), ("indexVar", "idx")],
            vec![el("li", &[], vec![text("{!contact.Name}")])],
        ));
        assert_eq!(
            out.template_text,
            "<template>\n    <template for:each={contacts} for:item=\"contact\" for:index=\"idx\">\n        <li key={contact.Id}>\n            {contact.Name}\n        </li>\n    </template>\n</template>\n"
        );
        assert!(out.used_directives.contains("for:each"));
        assert!(out.used_directives.contains("key"));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("verify"));
    }

    #[test]
    fn test_iteration_key_injection_disabled() {
        let options = TransformOptions {
            inject_iteration_keys: false,
            ..Default::default()
        };
        let root = el(
            "aura:iteration",
            &[("items", "{!v.rows}"), ("var", "row")],
            vec![el("tr", &[], vec![])],
        );
        let out = transform_tree(&root, &options);
        assert!(!out.template_text.contains("key="));
        assert!(out.warnings[0].contains("manually"));
    }

    #[test]
    fn test_iteration_custom_key_field() {
        let options = TransformOptions {
            iteration_key_field: "uid".to_string(),
            ..Default::default()
        };
        let root = el("aura:iteration", &[("items", "{!v.rows}"), ("var", "row")], vec![el("tr", &[], vec![])]);
        let out = transform_tree(&root, &options);
        assert!(out.template_text.contains("<tr key={row.uid} />"));
    }

    #[test]
    fn test_iteration_without_items() {
        let out = render(el("aura:iteration", &[("var", "x")], vec![el("span", &[], vec![])]));
        assert!(out.template_text.contains("MANUAL CONVERSION REQUIRED"));
        assert!(out.template_text.contains("<span />"));
        assert!(!out.used_directives.contains("for:each"));
    }

    #[test]
    fn test_known_slot_on_card() {
        let out = render(el(
            "lightning:card",
            &[],
            vec![el("aura:set", &[("attribute", "footer")], vec![el("lightning:button", &[("label", "Save")], vec![])])],
        ));
        assert_eq!(
            out.template_text,
            "<template>\n    <lightning-card>\n        <div slot=\"footer\">\n            <lightning-button label=\"Save\" />\n        </div>\n    </lightning-card>\n</template>\n"
        );
        assert_eq!(out.facet_contents.len(), 1);
        assert_eq!(out.facet_contents[0].slot_name, "footer");
        assert_eq!(out.facet_contents[0].rendered_content, "<lightning-button label=\"Save\" />");
        assert!(out.warnings.is_empty());
        assert!(out.used_directives.contains("slot"));
    }

    #[test]
    fn test_unknown_slot_warns() {
        let out = render(el(
            "c:panel",
            &[],
            vec![el("aura:set", &[("attribute", "header")], vec![text("Title")])],
        ));
        assert!(out.template_text.contains("<div slot=\"header\">"));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("c:panel"));
        assert_eq!(out.facet_contents[0].rendered_content, "Title");
    }

    #[test]
    fn test_empty_slot_designator_keeps_content() {
        let out = render(el("div", &[], vec![el("aura:set", &[], vec![text("orphan")])]));
        assert_eq!(
            out.template_text,
            "<template>\n    <div>\n        <!-- MANUAL CONVERSION REQUIRED: aura:set without attribute -->\n        orphan\n    </div>\n</template>\n"
        );
        assert!(out.facet_contents.is_empty());
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_raw_html() {
        let out = render(el("aura:html", &[("tag", "section"), ("body", "{!v.content}")], vec![]));
        assert_eq!(
            out.template_text,
            "<template>\n    <section>\n        {content}\n    </section>\n</template>\n"
        );
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_raw_html_dynamic_tag_falls_back() {
        let out = render(el("aura:html", &[("tag", "{!v.tagName}")], vec![]));
        assert_eq!(out.template_text, "<template>\n    <div />\n</template>\n");
        assert_eq!(out.warnings.len(), 2);
    }

    #[test]
    fn test_unmapped_tag_silent_by_default() {
        let out = render(el("force:navigation", &[], vec![]));
        assert_eq!(out.template_text, "<template>\n    <force:navigation />\n</template>\n");
        assert!(out.warnings.is_empty());
        assert!(out.used_components.is_empty());
    }

    #[test]
    fn test_unmapped_tag_warning_opt_in() {
        let options = TransformOptions {
            warn_on_unmapped_tags: true,
            ..Default::default()
        };
        let out = transform_tree(&el("force:navigation", &[], vec![el("div", &[], vec![])]), &options);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_extends_warns() {
        let out = render(el("aura:component", &[("extends", "c:base")], vec![]));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("c:base"));
    }

    #[test]
    fn test_non_component_root_is_rendered() {
        let out = render(el("p", &[], vec![text("hi")]));
        assert_eq!(out.template_text, "<template>\n    <p>\n        hi\n    </p>\n</template>\n");
    }

    #[test]
    fn test_labels_collected() {
        let out = render(el("h1", &[], vec![text("{!$Label.c.Welcome}")]));
        assert!(out.template_text.contains("{label.Welcome}"));
        assert!(out.used_labels.contains("c.Welcome"));
    }
}
